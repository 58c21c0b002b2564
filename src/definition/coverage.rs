//! Package coverage
//!
//! Before anything is installed, the package's filter tells which paths the
//! installation is going to touch. The hook only ever consumes that through
//! `CoverageSource`.

use crate::listener::ActionCode;
use crate::store::StoreResult;

/// Paths a package installation will touch
pub trait CoverageSource {
    /// Invoke `visitor` once per covered path at or below `root`
    fn for_each_covered_path(
        &self,
        root: &str,
        visitor: &mut dyn FnMut(&ActionCode, &str),
    ) -> StoreResult<()>;
}

/// Coverage backed by a precomputed list of `(action, path)` entries
#[derive(Debug, Clone, Default)]
pub struct StaticCoverage {
    entries: Vec<(ActionCode, String)>,
}

impl StaticCoverage {
    /// Create an empty coverage
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, keeping report order
    pub fn with(mut self, action: ActionCode, path: impl Into<String>) -> Self {
        self.push(action, path);
        self
    }

    /// Add an entry, keeping report order
    pub fn push(&mut self, action: ActionCode, path: impl Into<String>) {
        self.entries.push((action, path.into()));
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ActionCode, String)> for StaticCoverage {
    fn from_iter<I: IntoIterator<Item = (ActionCode, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl CoverageSource for StaticCoverage {
    fn for_each_covered_path(
        &self,
        root: &str,
        visitor: &mut dyn FnMut(&ActionCode, &str),
    ) -> StoreResult<()> {
        for (action, path) in &self.entries {
            if is_within(root, path) {
                visitor(action, path);
            }
        }
        Ok(())
    }
}

/// Whether `path` is `root` or below it. `root` may end with `/`.
pub(crate) fn is_within(root: &str, path: &str) -> bool {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return path.starts_with('/');
    }
    match path.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
