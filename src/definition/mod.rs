//! Index definitions
//!
//! A definition root is a direct child of an index-root container, e.g.
//! `/oak:index/lucene` below `/oak:index`. Every mutated path is attributed
//! to the definition root that owns it, or to nothing.

mod classifier;
mod coverage;
mod discovery;

pub use classifier::{PathClassifier, DEFAULT_INDEX_ROOT_MARKER};
pub use coverage::{CoverageSource, StaticCoverage};
pub(crate) use coverage::is_within;
pub use discovery::DefinitionDiscovery;

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// Absolute path of one index definition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DefinitionRoot(String);

impl DefinitionRoot {
    /// Only the classifier mints roots, so every value is a valid root path
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The root's path
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DefinitionRoot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DefinitionRoot {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DefinitionRoot {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DefinitionRoot {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for DefinitionRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
