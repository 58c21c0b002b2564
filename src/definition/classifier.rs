//! Path classification
//!
//! Maps any node path to the definition root owning it:
//!
//! ```text
//! /oak:index/foo/bar/baz  -> /oak:index/foo
//! /oak:index/foo          -> /oak:index/foo
//! /oak:index              -> none
//! /a/oak:index/foo/bar    -> /a/oak:index/foo
//! /content/page           -> none
//! ```
//!
//! Matching is per segment: `/oak:indexes/foo` is not below a marker. When
//! the marker occurs more than once the first occurrence wins.

use super::DefinitionRoot;

/// Name of the index-root container node
pub const DEFAULT_INDEX_ROOT_MARKER: &str = "oak:index";

/// Attributes paths to definition roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathClassifier {
    marker: String,
}

impl Default for PathClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_ROOT_MARKER)
    }
}

impl PathClassifier {
    /// Create a classifier for the given container segment name.
    ///
    /// The marker is expected to be a single non-empty segment;
    /// `HookConfig::validate` enforces that for configured markers.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The container segment name
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns the definition root owning `path`, if any
    pub fn classify(&self, path: &str) -> Option<DefinitionRoot> {
        if !path.starts_with('/') {
            return None;
        }

        let mut start = 0;
        for segment in path.split('/') {
            let end = start + segment.len();
            if segment == self.marker {
                // `rest` is empty or starts with '/'
                let rest = &path[end..];
                let child = rest.strip_prefix('/')?.split('/').next()?;
                if child.is_empty() {
                    return None;
                }
                return Some(DefinitionRoot::new(&path[..end + 1 + child.len()]));
            }
            start = end + 1;
        }

        None
    }

    /// Whether `path` is itself a definition root
    pub fn is_definition_root(&self, path: &str) -> bool {
        self.classify(path).is_some_and(|root| root == path)
    }
}
