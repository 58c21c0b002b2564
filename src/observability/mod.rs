//! Observability for the reindex hook
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle events
//!
//! Observability is read-only: it never influences a reindex decision, and a
//! failing log sink never fails an installation.

mod events;
mod logger;

pub use events::HookEvent;
pub use logger::{Logger, Severity};

/// Log a hook event at its own severity
pub fn log_event(event: HookEvent, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
