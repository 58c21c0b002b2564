//! Installer listener slot

use std::sync::Arc;

use super::action::{ActionCode, Mode};
use super::compound::CompoundListener;
use super::errors::{ListenerError, ListenerResult};
use super::ProgressListener;

/// The single listener slot of an installation.
///
/// Listeners are only ever added: `compose` keeps whatever is already
/// registered in front of the new listener.
#[derive(Clone, Default)]
pub struct ListenerSlot {
    listener: Option<Arc<dyn ProgressListener>>,
}

impl ListenerSlot {
    /// An empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot already holding the caller's listener
    pub fn with_listener(listener: Arc<dyn ProgressListener>) -> Self {
        Self {
            listener: Some(listener),
        }
    }

    /// Register `listener` after the current content
    pub fn compose(&mut self, listener: Arc<dyn ProgressListener>) {
        let composed = CompoundListener::create(self.listener.take().into_iter().chain([listener]));
        self.listener = Some(Arc::new(composed));
    }

    /// The registered listener, if any
    pub fn listener(&self) -> Option<&Arc<dyn ProgressListener>> {
        self.listener.as_ref()
    }

    /// Number of leaf listeners registered
    pub fn leaf_count(&self) -> usize {
        match &self.listener {
            None => 0,
            Some(listener) => listener.as_compound().map_or(1, CompoundListener::len),
        }
    }

    /// Forward a progress message to the registered listener
    pub fn deliver_message(&self, mode: Mode, action: &ActionCode, path: &str) -> ListenerResult<()> {
        match &self.listener {
            Some(listener) => listener.on_message(mode, action, path),
            None => Ok(()),
        }
    }

    /// Forward an installer error to the registered listener
    pub fn deliver_error(&self, mode: Mode, path: &str, error: &ListenerError) -> ListenerResult<()> {
        match &self.listener {
            Some(listener) => listener.on_error(mode, path, error),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("leaves", &self.leaf_count())
            .finish()
    }
}
