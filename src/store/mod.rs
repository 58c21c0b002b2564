//! Property store access
//!
//! The hook reads and writes maintenance properties through `PropertyStore`,
//! a narrow view of the installer's transactional session. Writes stay
//! pending until `commit`, which the hook calls exactly once per run.

mod errors;
mod memory;
mod snapshot;

pub use errors::{StoreError, StoreResult};
pub use memory::MemorySession;
pub use snapshot::{
    MaintenanceProperties, PropertySnapshotStore, ReindexRecord, RestoreReport, SkippedRoot,
};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean property
    Boolean(bool),
    /// 64-bit integer property
    Long(i64),
    /// String property
    String(String),
}

impl PropertyValue {
    /// Read as a boolean, accepting `"true"` / `"false"` strings
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            PropertyValue::String(s) => s.trim().parse().ok(),
            PropertyValue::Long(_) => None,
        }
    }

    /// Read as an integer, accepting decimal strings
    pub fn as_long(&self) -> Option<i64> {
        match self {
            PropertyValue::Long(n) => Some(*n),
            PropertyValue::String(s) => s.trim().parse().ok(),
            PropertyValue::Boolean(_) => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Long(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Long(n) => write!(f, "{}", n),
            PropertyValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// Transactional property access shared with the rest of the installation
pub trait PropertyStore {
    /// Whether a node exists at `path`
    fn node_exists(&self, path: &str) -> StoreResult<bool>;

    /// Read a property; `Ok(None)` if the node has no such property.
    ///
    /// Returns `NodeNotFound` if the node itself is missing.
    fn get_property(&self, path: &str, name: &str) -> StoreResult<Option<PropertyValue>>;

    /// Write a property, pending until commit
    fn set_property(&mut self, path: &str, name: &str, value: PropertyValue) -> StoreResult<()>;

    /// Remove a property if present, pending until commit
    fn remove_property(&mut self, path: &str, name: &str) -> StoreResult<()>;

    /// Persist every pending change
    fn commit(&mut self) -> StoreResult<()>;
}
