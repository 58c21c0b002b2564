//! In-memory transactional session
//!
//! Keeps a committed tree and a working copy. Every read and write goes to
//! the working copy; `commit` publishes it and `refresh` throws it away.
//! Used by hosts without their own repository and by the tests.

use std::collections::{BTreeMap, BTreeSet};

use super::errors::{StoreError, StoreResult};
use super::{PropertyStore, PropertyValue};
use crate::definition::is_within;

type Properties = BTreeMap<String, PropertyValue>;
type Tree = BTreeMap<String, Properties>;

/// In-memory session over a hierarchical node tree
#[derive(Debug, Clone)]
pub struct MemorySession {
    committed: Tree,
    working: Tree,
    commits: usize,
    failing_paths: BTreeSet<String>,
    fail_commit: bool,
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySession {
    /// Create a session holding only the root node
    pub fn new() -> Self {
        let mut tree = Tree::new();
        tree.insert("/".to_string(), Properties::new());
        Self {
            committed: tree.clone(),
            working: tree,
            commits: 0,
            failing_paths: BTreeSet::new(),
            fail_commit: false,
        }
    }

    /// Add a node and any missing ancestors to the working copy.
    ///
    /// Paths that are not absolute are ignored.
    pub fn add_node(&mut self, path: &str) {
        if !path.starts_with('/') {
            return;
        }
        for ancestor in ancestors(path) {
            self.working.entry(ancestor).or_default();
        }
        self.working.entry(path.to_string()).or_default();
    }

    /// Remove a node and its whole subtree from the working copy
    pub fn remove_node(&mut self, path: &str) -> StoreResult<()> {
        if !self.working.contains_key(path) {
            return Err(StoreError::node_not_found(path));
        }
        self.working.retain(|node, _| !is_within(path, node));
        Ok(())
    }

    /// Pending properties of a node
    pub fn properties(&self, path: &str) -> Option<&BTreeMap<String, PropertyValue>> {
        self.working.get(path)
    }

    /// Paths of every node at or below `root`, in order
    pub fn node_paths(&self, root: &str) -> Vec<String> {
        self.working
            .keys()
            .filter(|node| is_within(root, node))
            .cloned()
            .collect()
    }

    /// A property as of the last commit
    pub fn committed_property(&self, path: &str, name: &str) -> Option<&PropertyValue> {
        self.committed.get(path).and_then(|props| props.get(name))
    }

    /// Drop every pending change
    pub fn refresh(&mut self) {
        self.working = self.committed.clone();
    }

    /// Whether the working copy differs from the last commit
    pub fn has_pending_changes(&self) -> bool {
        self.working != self.committed
    }

    /// Number of successful commits so far
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Make every read and write at `path` fail with an access error
    pub fn inject_access_failure(&mut self, path: impl Into<String>) {
        self.failing_paths.insert(path.into());
    }

    /// Make the next commits fail
    pub fn set_commit_failure(&mut self, fail: bool) {
        self.fail_commit = fail;
    }

    fn check_access(&self, path: &str) -> StoreResult<()> {
        if self.failing_paths.contains(path) {
            return Err(StoreError::access(path, "injected failure"));
        }
        Ok(())
    }

    fn node_mut(&mut self, path: &str) -> StoreResult<&mut Properties> {
        self.working
            .get_mut(path)
            .ok_or_else(|| StoreError::node_not_found(path))
    }
}

impl PropertyStore for MemorySession {
    fn node_exists(&self, path: &str) -> StoreResult<bool> {
        self.check_access(path)?;
        Ok(self.working.contains_key(path))
    }

    fn get_property(&self, path: &str, name: &str) -> StoreResult<Option<PropertyValue>> {
        self.check_access(path)?;
        let props = self
            .working
            .get(path)
            .ok_or_else(|| StoreError::node_not_found(path))?;
        Ok(props.get(name).cloned())
    }

    fn set_property(&mut self, path: &str, name: &str, value: PropertyValue) -> StoreResult<()> {
        self.check_access(path)?;
        self.node_mut(path)?.insert(name.to_string(), value);
        Ok(())
    }

    fn remove_property(&mut self, path: &str, name: &str) -> StoreResult<()> {
        self.check_access(path)?;
        self.node_mut(path)?.remove(name);
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        if self.fail_commit {
            return Err(StoreError::commit("injected failure"));
        }
        self.committed = self.working.clone();
        self.commits += 1;
        Ok(())
    }
}

/// Proper ancestors of an absolute path, root first
fn ancestors(path: &str) -> Vec<String> {
    let mut result = vec!["/".to_string()];
    if let Some(rest) = path.strip_prefix('/') {
        // `i` indexes `rest`, which starts one byte into `path`
        result.extend(rest.match_indices('/').map(|(i, _)| path[..i + 1].to_string()));
    }
    result
}
