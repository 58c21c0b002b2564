//! Hook error types
//!
//! Error codes:
//! - REINDEX_PREPARE_FAILED (fatal: the installation must abort)
//! - REINDEX_RESTORE_FAILED (degraded: content stays installed, the index
//!   may need a manual reindex)
//! - REINDEX_INVALID_PHASE

use thiserror::Error;

use super::phase::{HookState, Phase};
use crate::store::StoreError;

/// Result type for hook execution
pub type HookResult<T> = Result<T, HookError>;

/// Errors returned to the installer
#[derive(Debug, Error)]
pub enum HookError {
    /// Discovery or snapshot failed during prepare
    #[error("prepare failed: {0}")]
    Prepare(#[source] StoreError),

    /// Restored properties could not be committed
    #[error("restore failed: {0}")]
    Restore(#[source] StoreError),

    /// The phase was signalled out of order
    #[error("phase {phase} not allowed in state {state}")]
    InvalidPhase { phase: Phase, state: HookState },
}

impl HookError {
    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Prepare(_) => "REINDEX_PREPARE_FAILED",
            Self::Restore(_) => "REINDEX_RESTORE_FAILED",
            Self::InvalidPhase { .. } => "REINDEX_INVALID_PHASE",
        }
    }

    /// Whether the installer must abort the installation
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Prepare(_))
    }
}
