//! Installation phases and hook states
//!
//! ```text
//! Idle --Prepare--> Prepared --(first change)--> Tracking --Installed/End--> Restored
//!   |                  |                            |
//!   +--(fail)----------+--PrepareFailed/InstallFailed--> Aborted
//! ```
//!
//! There is no way back from `Restored` or `Aborted`; every installation run
//! uses a fresh hook.

use std::fmt;

/// Lifecycle phase signalled by the installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before any content is written; failing here aborts the install
    Prepare,
    /// Another participant failed during prepare
    PrepareFailed,
    /// Content was written, the session is not yet committed
    Installed,
    /// Writing content failed
    InstallFailed,
    /// Final phase, always signalled last
    End,
}

impl Phase {
    /// Returns the phase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Prepare => "PREPARE",
            Phase::PrepareFailed => "PREPARE_FAILED",
            Phase::Installed => "INSTALLED",
            Phase::InstallFailed => "INSTALL_FAILED",
            Phase::End => "END",
        }
    }

    /// Whether the installer reports a failure with this phase
    pub fn is_failure(&self) -> bool {
        matches!(self, Phase::PrepareFailed | Phase::InstallFailed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable state of a reindex hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookState {
    /// Nothing done yet
    Idle,
    /// Properties stripped, tracker registered, no change seen yet
    Prepared,
    /// At least one definition change seen
    Tracking,
    /// Properties written back and committed (or commit attempted)
    Restored,
    /// The run was abandoned; nothing will be restored
    Aborted,
}

impl HookState {
    /// Returns the state name
    pub fn as_str(&self) -> &'static str {
        match self {
            HookState::Idle => "IDLE",
            HookState::Prepared => "PREPARED",
            HookState::Tracking => "TRACKING",
            HookState::Restored => "RESTORED",
            HookState::Aborted => "ABORTED",
        }
    }

    /// Whether the hook holds a snapshot waiting to be restored
    pub fn is_prepared(&self) -> bool {
        matches!(self, HookState::Prepared | HookState::Tracking)
    }

    /// Whether the hook accepts no further work
    pub fn is_terminal(&self) -> bool {
        matches!(self, HookState::Restored | HookState::Aborted)
    }
}

impl fmt::Display for HookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
