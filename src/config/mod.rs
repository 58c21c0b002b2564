//! Hook configuration
//!
//! Every literal the hook depends on is configurable: the container segment
//! name, the two maintenance property names, the coverage root and both
//! action filters. Defaults match an Oak repository.
//!
//! ```json
//! {
//!   "index_root_marker": "oak:index",
//!   "reindex_property": "reindex",
//!   "reindex_count_property": "reindexCount",
//!   "coverage_root": "/",
//!   "discovery_actions": ["A"],
//!   "change_actions": ["A", "U", "D"]
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::{PathClassifier, DEFAULT_INDEX_ROOT_MARKER};
use crate::listener::{ActionCode, ActionFilter};
use crate::store::MaintenanceProperties;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),

    /// The configuration is not valid JSON for `HookConfig`
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration of one reindex hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Name of the index-root container segment
    pub index_root_marker: String,
    /// Name of the boolean reindex flag
    pub reindex_property: String,
    /// Name of the reindex counter
    pub reindex_count_property: String,
    /// Root below which the package coverage is scanned
    pub coverage_root: String,
    /// Coverage actions that identify an existing definition
    pub discovery_actions: Vec<ActionCode>,
    /// Installer actions that count as a definition change
    pub change_actions: Vec<ActionCode>,
}

impl Default for HookConfig {
    fn default() -> Self {
        let properties = MaintenanceProperties::default();
        Self {
            index_root_marker: DEFAULT_INDEX_ROOT_MARKER.to_string(),
            reindex_property: properties.reindex,
            reindex_count_property: properties.reindex_count,
            coverage_root: "/".to_string(),
            discovery_actions: vec![ActionCode::Added],
            change_actions: vec![ActionCode::Added, ActionCode::Updated, ActionCode::Deleted],
        }
    }
}

impl HookConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every value
    pub fn validate(&self) -> ConfigResult<()> {
        if self.index_root_marker.is_empty() || self.index_root_marker.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "index_root_marker must be a single path segment, got {:?}",
                self.index_root_marker
            )));
        }
        if self.reindex_property.is_empty() || self.reindex_count_property.is_empty() {
            return Err(ConfigError::Invalid(
                "maintenance property names must not be empty".to_string(),
            ));
        }
        if self.reindex_property == self.reindex_count_property {
            return Err(ConfigError::Invalid(format!(
                "reindex_property and reindex_count_property are both {:?}",
                self.reindex_property
            )));
        }
        if !self.coverage_root.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "coverage_root must be absolute, got {:?}",
                self.coverage_root
            )));
        }
        if self.coverage_root != "/" && self.coverage_root.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "coverage_root must not end with '/', got {:?}",
                self.coverage_root
            )));
        }
        if self.change_actions.is_empty() {
            return Err(ConfigError::Invalid(
                "change_actions must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Classifier for the configured container segment
    pub fn classifier(&self) -> PathClassifier {
        PathClassifier::new(self.index_root_marker.clone())
    }

    /// Names of the maintenance properties
    pub fn maintenance_properties(&self) -> MaintenanceProperties {
        MaintenanceProperties {
            reindex: self.reindex_property.clone(),
            reindex_count: self.reindex_count_property.clone(),
        }
    }

    /// Filter applied during discovery
    pub fn discovery_filter(&self) -> ActionFilter {
        self.discovery_actions.iter().cloned().collect()
    }

    /// Filter applied by the change tracker
    pub fn change_filter(&self) -> ActionFilter {
        self.change_actions.iter().cloned().collect()
    }
}
