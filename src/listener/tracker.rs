//! Change tracking
//!
//! Attributes installer events to definition roots. Only roots hit by an
//! event whose action passes the filter end up in the changed set; errors
//! reported by the installer never count as changes.
//!
//! The tracker cannot be removed from the installer's listener slot, so the
//! hook closes it once the changed set has been consumed. A closed tracker
//! ignores every event.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::action::{ActionCode, ActionFilter, Mode};
use super::errors::{ListenerError, ListenerResult};
use super::ProgressListener;
use crate::definition::{DefinitionRoot, PathClassifier};
use crate::observability::{log_event, HookEvent};

/// Collects the definition roots touched during installation
#[derive(Debug)]
pub struct ChangeTracker {
    classifier: PathClassifier,
    actions: ActionFilter,
    changed: Mutex<BTreeSet<DefinitionRoot>>,
    observed: AtomicUsize,
    closed: AtomicBool,
}

impl ChangeTracker {
    /// Create a tracker reacting to `actions`
    pub fn new(classifier: PathClassifier, actions: ActionFilter) -> Self {
        Self {
            classifier,
            actions,
            changed: Mutex::new(BTreeSet::new()),
            observed: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Snapshot of the roots seen changing so far
    pub fn changed(&self) -> BTreeSet<DefinitionRoot> {
        self.lock().clone()
    }

    /// Whether `root` was seen changing
    pub fn has_changed(&self, root: &str) -> bool {
        self.lock().contains(root)
    }

    /// Stop tracking; later events are ignored
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Whether `close` was called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of events attributed to a definition root
    pub fn events_observed(&self) -> usize {
        self.observed.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<DefinitionRoot>> {
        // The set stays consistent even if a holder panicked mid-insert
        self.changed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressListener for ChangeTracker {
    fn on_message(&self, _mode: Mode, action: &ActionCode, path: &str) -> ListenerResult<()> {
        if self.is_closed() || !self.actions.contains(action) {
            return Ok(());
        }
        let Some(root) = self.classifier.classify(path) else {
            return Ok(());
        };

        self.observed.fetch_add(1, Ordering::Relaxed);
        log_event(
            HookEvent::DefinitionChanged,
            &[("action", action.code()), ("path", path), ("root", root.as_str())],
        );
        self.lock().insert(root);
        Ok(())
    }

    fn on_error(&self, _mode: Mode, _path: &str, _error: &ListenerError) -> ListenerResult<()> {
        Ok(())
    }
}
