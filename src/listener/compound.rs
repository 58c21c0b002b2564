//! Listener composition
//!
//! Composing never nests: a composite passed to `CompoundListener::create`
//! contributes its leaves, so fan-out is always one flat loop.

use std::sync::Arc;

use super::action::{ActionCode, Mode};
use super::errors::{ListenerError, ListenerResult};
use super::ProgressListener;
use crate::observability::{log_event, HookEvent};

/// Delivers every event to each leaf listener in registration order
#[derive(Clone, Default)]
pub struct CompoundListener {
    listeners: Vec<Arc<dyn ProgressListener>>,
}

impl CompoundListener {
    /// Compose listeners, flattening any composite among them
    pub fn create<I>(listeners: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ProgressListener>>,
    {
        let mut flat: Vec<Arc<dyn ProgressListener>> = Vec::new();
        for listener in listeners {
            match listener.as_compound() {
                Some(compound) => flat.extend(compound.listeners.iter().cloned()),
                None => flat.push(listener),
            }
        }
        Self { listeners: flat }
    }

    /// Leaf listeners in delivery order
    pub fn listeners(&self) -> &[Arc<dyn ProgressListener>] {
        &self.listeners
    }

    /// Number of leaf listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether there are no leaves
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn report(index: usize, path: &str, error: &ListenerError) {
        let index = index.to_string();
        let error = error.to_string();
        log_event(
            HookEvent::ListenerDeliveryFailed,
            &[
                ("error", error.as_str()),
                ("listener", index.as_str()),
                ("path", path),
            ],
        );
    }
}

impl ProgressListener for CompoundListener {
    fn on_message(&self, mode: Mode, action: &ActionCode, path: &str) -> ListenerResult<()> {
        for (index, listener) in self.listeners.iter().enumerate() {
            if let Err(e) = listener.on_message(mode, action, path) {
                Self::report(index, path, &e);
            }
        }
        Ok(())
    }

    fn on_error(&self, mode: Mode, path: &str, error: &ListenerError) -> ListenerResult<()> {
        for (index, listener) in self.listeners.iter().enumerate() {
            if let Err(e) = listener.on_error(mode, path, error) {
                Self::report(index, path, &e);
            }
        }
        Ok(())
    }

    fn as_compound(&self) -> Option<&CompoundListener> {
        Some(self)
    }
}

impl std::fmt::Debug for CompoundListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompoundListener")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
