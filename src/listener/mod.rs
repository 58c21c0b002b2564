//! Progress listeners
//!
//! The installer reports each node it touches to the listener registered in
//! its listener slot. The hook adds its own `ChangeTracker` to that slot
//! through `CompoundListener`, so whatever the caller registered keeps
//! receiving every event.

mod action;
mod compound;
mod errors;
mod slot;
mod tracker;

pub use action::{ActionCode, ActionFilter, Mode};
pub use compound::CompoundListener;
pub use errors::{ListenerError, ListenerResult};
pub use slot::ListenerSlot;
pub use tracker::ChangeTracker;

/// Receiver of installer progress events
pub trait ProgressListener: Send + Sync {
    /// A node at `path` was processed with `action`
    fn on_message(&self, mode: Mode, action: &ActionCode, path: &str) -> ListenerResult<()>;

    /// The installer failed to process `path`
    fn on_error(&self, mode: Mode, path: &str, error: &ListenerError) -> ListenerResult<()>;

    /// Returns `Some` for composite listeners so they can be flattened
    fn as_compound(&self) -> Option<&CompoundListener> {
        None
    }
}
