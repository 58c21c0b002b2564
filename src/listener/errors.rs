//! Listener error types

use thiserror::Error;

/// Result type for listener callbacks
pub type ListenerResult<T> = Result<T, ListenerError>;

/// Errors raised by or reported to progress listeners
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    /// A listener could not process an event
    #[error("listener failed on {path}: {message}")]
    Delivery { path: String, message: String },

    /// The installer reported a failure for a path
    #[error("installer error on {path}: {message}")]
    Installer { path: String, message: String },

    /// An action code was empty
    #[error("action code must not be empty")]
    EmptyActionCode,
}

impl ListenerError {
    /// Create a delivery error
    pub fn delivery(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an installer-reported error
    pub fn installer(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Installer {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Delivery { .. } => "REINDEX_LISTENER_DELIVERY",
            Self::Installer { .. } => "REINDEX_INSTALLER_ERROR",
            Self::EmptyActionCode => "REINDEX_EMPTY_ACTION_CODE",
        }
    }
}
