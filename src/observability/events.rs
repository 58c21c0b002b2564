//! Observable events emitted by the reindex hook
//!
//! Events are explicit and typed. Each event carries its own severity so
//! call sites never pick one ad hoc.

use std::fmt;

use super::logger::Severity;

/// Observable hook events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    // Prepare phase
    /// Prepare phase begins
    PrepareBegin,
    /// A definition root was found in the package coverage
    DefinitionDiscovered,
    /// Maintenance properties were read and removed from a root
    PropertiesStripped,
    /// A root listed by the coverage could not be snapshotted
    SnapshotRootSkipped,
    /// The change tracker joined the installer's listener slot
    ListenerRegistered,
    /// Prepare phase complete
    PrepareComplete,
    /// Prepare phase failed, the install must abort
    PrepareFailed,

    // Tracking
    /// A mutation event was attributed to a definition root
    DefinitionChanged,
    /// A composed listener returned an error; delivery continued
    ListenerDeliveryFailed,

    // Restore phase
    /// A changed definition was restored with the reindex flag forced
    MarkedForReindex,
    /// An unchanged definition got its recorded properties back
    PropertiesRestored,
    /// A root could not be restored and was skipped
    RestoreRootSkipped,
    /// Restore finished and was committed
    RestoreComplete,
    /// Restore could not be committed
    RestoreFailed,

    /// The host reported a failed phase; in-memory state was dropped
    InstallAborted,
}

impl HookEvent {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::PrepareBegin => "REINDEX_PREPARE_BEGIN",
            HookEvent::DefinitionDiscovered => "DEFINITION_DISCOVERED",
            HookEvent::PropertiesStripped => "REINDEX_PROPERTIES_STRIPPED",
            HookEvent::SnapshotRootSkipped => "SNAPSHOT_ROOT_SKIPPED",
            HookEvent::ListenerRegistered => "LISTENER_REGISTERED",
            HookEvent::PrepareComplete => "REINDEX_PREPARE_COMPLETE",
            HookEvent::PrepareFailed => "REINDEX_PREPARE_FAILED",

            HookEvent::DefinitionChanged => "DEFINITION_CHANGED",
            HookEvent::ListenerDeliveryFailed => "LISTENER_DELIVERY_FAILED",

            HookEvent::MarkedForReindex => "DEFINITION_MARKED_FOR_REINDEX",
            HookEvent::PropertiesRestored => "DEFINITION_PROPERTIES_RESTORED",
            HookEvent::RestoreRootSkipped => "RESTORE_ROOT_SKIPPED",
            HookEvent::RestoreComplete => "REINDEX_RESTORE_COMPLETE",
            HookEvent::RestoreFailed => "REINDEX_RESTORE_FAILED",

            HookEvent::InstallAborted => "INSTALL_ABORTED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            HookEvent::DefinitionChanged | HookEvent::PropertiesStripped => Severity::Trace,
            HookEvent::SnapshotRootSkipped
            | HookEvent::ListenerDeliveryFailed
            | HookEvent::RestoreRootSkipped
            | HookEvent::InstallAborted => Severity::Warn,
            HookEvent::PrepareFailed | HookEvent::RestoreFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
