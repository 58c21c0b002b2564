//! Maintenance property snapshots
//!
//! Before the installer runs, the `reindex` flag and `reindexCount` counter
//! of every discovered definition are recorded and removed from the
//! session. Left in place, the installer's own property diff would report
//! each definition as updated. After the install they are written back, with
//! the flag forced on for definitions the install really changed.
//!
//! # Invariants
//!
//! - One record per snapshotted root, restored exactly once (`restore`
//!   consumes the snapshot)
//! - A count that was absent is never written back
//! - Stripping never commits; restore commits exactly once

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::{PropertyStore, PropertyValue};
use crate::definition::DefinitionRoot;
use crate::observability::{log_event, HookEvent};

/// Names of the two maintenance properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceProperties {
    /// Boolean "needs full reindex" flag
    pub reindex: String,
    /// Integer reindex generation counter
    pub reindex_count: String,
}

impl Default for MaintenanceProperties {
    fn default() -> Self {
        Self {
            reindex: "reindex".to_string(),
            reindex_count: "reindexCount".to_string(),
        }
    }
}

/// Maintenance properties recorded for one definition root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReindexRecord {
    /// Recorded flag, `false` when the property was absent
    pub reindex: bool,
    /// Recorded counter, `None` when the property was absent
    pub reindex_count: Option<i64>,
}

/// A root that could not be snapshotted or restored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRoot {
    /// The definition root
    pub root: DefinitionRoot,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of a restore
#[derive(Debug, Clone, Serialize)]
pub struct RestoreReport {
    /// Roots restored with the reindex flag forced on
    pub marked: Vec<DefinitionRoot>,
    /// Roots restored with their recorded values
    pub restored: Vec<DefinitionRoot>,
    /// Roots skipped while snapshotting, then roots that could not be
    /// restored
    pub skipped: Vec<SkippedRoot>,
    /// When the restore was committed
    pub completed_at: DateTime<Utc>,
}

impl RestoreReport {
    /// Whether `root` was forced to reindex
    pub fn is_marked(&self, root: &str) -> bool {
        self.marked.iter().any(|r| r == root)
    }
}

/// Owns the recorded maintenance properties between prepare and restore
#[derive(Debug)]
pub struct PropertySnapshotStore {
    run_id: Uuid,
    names: MaintenanceProperties,
    records: BTreeMap<DefinitionRoot, ReindexRecord>,
    skipped: Vec<SkippedRoot>,
}

impl PropertySnapshotStore {
    /// Record and remove the maintenance properties of every root.
    ///
    /// A root that is missing from the session, or holds a value of the
    /// wrong type, is skipped without a record. Any other store failure is
    /// returned; the removals done so far are uncommitted and go away with
    /// the aborted session.
    pub fn snapshot_and_strip<I>(
        run_id: Uuid,
        names: MaintenanceProperties,
        store: &mut dyn PropertyStore,
        roots: I,
    ) -> StoreResult<Self>
    where
        I: IntoIterator<Item = DefinitionRoot>,
    {
        let run = run_id.to_string();
        let run = run.as_str();
        let mut records = BTreeMap::new();
        let mut skipped = Vec::new();

        for root in roots {
            let record = match read_record(store, &names, &root) {
                Ok(record) => record,
                Err(e) if e.is_per_root() => {
                    let reason = e.to_string();
                    log_event(
                        HookEvent::SnapshotRootSkipped,
                        &[("root", root.as_str()), ("reason", reason.as_str()), ("run_id", run)],
                    );
                    skipped.push(SkippedRoot { root, reason });
                    continue;
                }
                Err(e) => return Err(e),
            };

            strip(store, &names, &root, &record)?;
            let flag = record.reindex.to_string();
            let count = format_count(record.reindex_count);
            log_event(
                HookEvent::PropertiesStripped,
                &[
                    ("reindex", flag.as_str()),
                    ("reindex_count", count.as_str()),
                    ("root", root.as_str()),
                    ("run_id", run),
                ],
            );
            records.insert(root, record);
        }

        Ok(Self {
            run_id,
            names,
            records,
            skipped,
        })
    }

    /// Recorded properties per root
    pub fn records(&self) -> &BTreeMap<DefinitionRoot, ReindexRecord> {
        &self.records
    }

    /// Recorded properties of one root
    pub fn record(&self, root: &str) -> Option<&ReindexRecord> {
        self.records.get(root)
    }

    /// Roots skipped while snapshotting
    pub fn skipped(&self) -> &[SkippedRoot] {
        &self.skipped
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write every record back and commit once.
    ///
    /// `reindex` becomes `record.reindex || changed.contains(root)`. The
    /// counter is only written if one was recorded. A root whose write fails
    /// is logged and skipped; only a failing commit is returned. The report
    /// also lists the roots already skipped while snapshotting.
    pub fn restore(
        self,
        store: &mut dyn PropertyStore,
        changed: &BTreeSet<DefinitionRoot>,
    ) -> StoreResult<RestoreReport> {
        let run = self.run_id.to_string();
        let run = run.as_str();
        let mut marked = Vec::new();
        let mut restored = Vec::new();
        let mut skipped = self.skipped;

        for (root, mut record) in self.records {
            let forced = changed.contains(&root);
            record.reindex |= forced;

            if let Err(e) = write_record(store, &self.names, &root, &record) {
                let reason = e.to_string();
                log_event(
                    HookEvent::RestoreRootSkipped,
                    &[("reason", reason.as_str()), ("root", root.as_str()), ("run_id", run)],
                );
                skipped.push(SkippedRoot { root, reason });
                continue;
            }

            if forced {
                log_event(
                    HookEvent::MarkedForReindex,
                    &[("root", root.as_str()), ("run_id", run)],
                );
                marked.push(root);
            } else {
                log_event(
                    HookEvent::PropertiesRestored,
                    &[("root", root.as_str()), ("run_id", run)],
                );
                restored.push(root);
            }
        }

        store.commit()?;

        Ok(RestoreReport {
            marked,
            restored,
            skipped,
            completed_at: Utc::now(),
        })
    }
}

fn read_record(
    store: &dyn PropertyStore,
    names: &MaintenanceProperties,
    root: &DefinitionRoot,
) -> StoreResult<ReindexRecord> {
    let path = root.as_str();
    let reindex = match store.get_property(path, &names.reindex)? {
        Some(value) => value
            .as_bool()
            .ok_or_else(|| value_format(path, &names.reindex, "boolean", &value))?,
        None => false,
    };
    let reindex_count = match store.get_property(path, &names.reindex_count)? {
        Some(value) => Some(
            value
                .as_long()
                .ok_or_else(|| value_format(path, &names.reindex_count, "long", &value))?,
        ),
        None => None,
    };
    Ok(ReindexRecord {
        reindex,
        reindex_count,
    })
}

fn strip(
    store: &mut dyn PropertyStore,
    names: &MaintenanceProperties,
    root: &DefinitionRoot,
    record: &ReindexRecord,
) -> StoreResult<()> {
    // An absent flag reads as `false`, so removing unconditionally is harmless
    store.remove_property(root.as_str(), &names.reindex)?;
    if record.reindex_count.is_some() {
        store.remove_property(root.as_str(), &names.reindex_count)?;
    }
    Ok(())
}

fn write_record(
    store: &mut dyn PropertyStore,
    names: &MaintenanceProperties,
    root: &DefinitionRoot,
    record: &ReindexRecord,
) -> StoreResult<()> {
    store.set_property(root.as_str(), &names.reindex, PropertyValue::Boolean(record.reindex))?;
    if let Some(count) = record.reindex_count {
        store.set_property(root.as_str(), &names.reindex_count, PropertyValue::Long(count))?;
    }
    Ok(())
}

fn value_format(path: &str, name: &str, expected: &'static str, found: &PropertyValue) -> StoreError {
    StoreError::ValueFormat {
        path: path.to_string(),
        name: name.to_string(),
        expected,
        found: found.to_string(),
    }
}

fn format_count(count: Option<i64>) -> String {
    count.map_or_else(|| "unset".to_string(), |n| n.to_string())
}
