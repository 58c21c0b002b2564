//! Definition discovery
//!
//! Runs once in the prepare phase: every covered path is classified and the
//! distinct definition roots are collected.

use std::collections::BTreeSet;

use super::classifier::PathClassifier;
use super::coverage::CoverageSource;
use super::DefinitionRoot;
use crate::listener::ActionFilter;
use crate::store::StoreResult;

/// Enumerates definition roots within a package's coverage
pub struct DefinitionDiscovery<'a> {
    classifier: &'a PathClassifier,
    actions: &'a ActionFilter,
}

impl<'a> DefinitionDiscovery<'a> {
    /// Create a discovery keeping only coverage entries whose action passes
    /// `actions`
    pub fn new(classifier: &'a PathClassifier, actions: &'a ActionFilter) -> Self {
        Self {
            classifier,
            actions,
        }
    }

    /// Drive `coverage` once below `root` and return the distinct roots
    pub fn discover(
        &self,
        coverage: &dyn CoverageSource,
        root: &str,
    ) -> StoreResult<BTreeSet<DefinitionRoot>> {
        let mut roots = BTreeSet::new();
        coverage.for_each_covered_path(root, &mut |action, path| {
            if !self.actions.contains(action) {
                return;
            }
            if let Some(definition) = self.classifier.classify(path) {
                roots.insert(definition);
            }
        })?;
        Ok(roots)
    }
}
