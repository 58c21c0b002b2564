//! Store error types
//!
//! Error codes:
//! - REINDEX_NODE_NOT_FOUND (per root)
//! - REINDEX_VALUE_FORMAT (per root)
//! - REINDEX_STORE_ACCESS
//! - REINDEX_COMMIT_FAILED

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the property store and the coverage source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The node does not exist in the session
    #[error("node not found: {path}")]
    NodeNotFound { path: String },

    /// A property value cannot be read as the expected type
    #[error("property {name} on {path} is not a {expected}: {found}")]
    ValueFormat {
        path: String,
        name: String,
        expected: &'static str,
        found: String,
    },

    /// The session could not be read or written
    #[error("store access failed at {path}: {message}")]
    Access { path: String, message: String },

    /// Persisting the session failed
    #[error("commit failed: {message}")]
    Commit { message: String },
}

impl StoreError {
    /// Create a node-not-found error
    pub fn node_not_found(path: impl Into<String>) -> Self {
        Self::NodeNotFound { path: path.into() }
    }

    /// Create an access error
    pub fn access(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Access {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a commit error
    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit {
            message: message.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NodeNotFound { .. } => "REINDEX_NODE_NOT_FOUND",
            Self::ValueFormat { .. } => "REINDEX_VALUE_FORMAT",
            Self::Access { .. } => "REINDEX_STORE_ACCESS",
            Self::Commit { .. } => "REINDEX_COMMIT_FAILED",
        }
    }

    /// Whether the failure concerns a single definition root only.
    ///
    /// Such failures skip that root; everything else aborts the operation.
    pub fn is_per_root(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. } | Self::ValueFormat { .. })
    }
}
