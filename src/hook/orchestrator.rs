//! Reindex install hook
//!
//! Drives one installation run:
//!
//! 1. PREPARE: discover the definitions in the package coverage, record and
//!    strip their maintenance properties, register the change tracker
//! 2. (installation): the tracker collects changed definitions
//! 3. INSTALLED / END: write the properties back, forcing `reindex` on for
//!    changed definitions, and commit once
//!
//! Stripping must precede every installer event and restoring must follow
//! the last one. The stage machine below only allows that order.

use std::mem;
use std::sync::Arc;

use uuid::Uuid;

use super::context::InstallContext;
use super::errors::{HookError, HookResult};
use super::phase::{HookState, Phase};
use super::InstallHook;
use crate::config::{ConfigResult, HookConfig};
use crate::definition::{CoverageSource, DefinitionDiscovery, PathClassifier};
use crate::listener::{ChangeTracker, ListenerSlot};
use crate::observability::{log_event, HookEvent};
use crate::store::{PropertySnapshotStore, PropertyStore, RestoreReport, StoreResult};

/// Internal stage; owns the snapshot between prepare and restore
enum Stage {
    Idle,
    Prepared {
        snapshot: PropertySnapshotStore,
        tracker: Arc<ChangeTracker>,
    },
    Restored,
    Aborted,
}

/// Install hook that flags changed index definitions for reindexing
pub struct ReindexInstallHook {
    run_id: Uuid,
    config: HookConfig,
    classifier: PathClassifier,
    stage: Stage,
    report: Option<RestoreReport>,
}

impl Default for ReindexInstallHook {
    fn default() -> Self {
        Self::new(HookConfig::default())
    }
}

impl ReindexInstallHook {
    /// Create a hook for one installation run.
    ///
    /// The configuration is taken as is; use `try_new` for untrusted input.
    pub fn new(config: HookConfig) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            classifier: config.classifier(),
            config,
            stage: Stage::Idle,
            report: None,
        }
    }

    /// Validate `config`, then create the hook
    pub fn try_new(config: HookConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Identifier of this run, present in every log line
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The hook's configuration
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> HookState {
        match &self.stage {
            Stage::Idle => HookState::Idle,
            Stage::Prepared { tracker, .. } if tracker.events_observed() > 0 => HookState::Tracking,
            Stage::Prepared { .. } => HookState::Prepared,
            Stage::Restored => HookState::Restored,
            Stage::Aborted => HookState::Aborted,
        }
    }

    /// The recorded maintenance properties, between prepare and restore
    pub fn snapshot(&self) -> Option<&PropertySnapshotStore> {
        match &self.stage {
            Stage::Prepared { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// The registered change tracker, between prepare and restore
    pub fn tracker(&self) -> Option<&Arc<ChangeTracker>> {
        match &self.stage {
            Stage::Prepared { tracker, .. } => Some(tracker),
            _ => None,
        }
    }

    /// Outcome of the restore, once it committed
    pub fn last_report(&self) -> Option<&RestoreReport> {
        self.report.as_ref()
    }

    /// Discover definitions, strip their maintenance properties and register
    /// the change tracker.
    ///
    /// Any failure is fatal for the installation and leaves the hook
    /// `Aborted`. The session is never committed here.
    pub fn prepare(
        &mut self,
        store: &mut dyn PropertyStore,
        coverage: &dyn CoverageSource,
        listeners: &mut ListenerSlot,
    ) -> HookResult<()> {
        let state = self.state();
        if state != HookState::Idle {
            return Err(HookError::InvalidPhase {
                phase: Phase::Prepare,
                state,
            });
        }

        let run = self.run_id.to_string();
        log_event(
            HookEvent::PrepareBegin,
            &[
                ("coverage_root", self.config.coverage_root.as_str()),
                ("marker", self.classifier.marker()),
                ("run_id", run.as_str()),
            ],
        );

        let snapshot = match self.snapshot_definitions(store, coverage) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let error = e.to_string();
                log_event(
                    HookEvent::PrepareFailed,
                    &[("error", error.as_str()), ("run_id", run.as_str())],
                );
                self.stage = Stage::Aborted;
                return Err(HookError::Prepare(e));
            }
        };

        let tracker = Arc::new(ChangeTracker::new(
            self.classifier.clone(),
            self.config.change_filter(),
        ));
        listeners.compose(tracker.clone());

        let leaves = listeners.leaf_count().to_string();
        log_event(
            HookEvent::ListenerRegistered,
            &[("listeners", leaves.as_str()), ("run_id", run.as_str())],
        );
        let definitions = snapshot.len().to_string();
        log_event(
            HookEvent::PrepareComplete,
            &[("definitions", definitions.as_str()), ("run_id", run.as_str())],
        );

        self.stage = Stage::Prepared { snapshot, tracker };
        Ok(())
    }

    fn snapshot_definitions(
        &self,
        store: &mut dyn PropertyStore,
        coverage: &dyn CoverageSource,
    ) -> StoreResult<PropertySnapshotStore> {
        let filter = self.config.discovery_filter();
        let roots = DefinitionDiscovery::new(&self.classifier, &filter)
            .discover(coverage, &self.config.coverage_root)?;

        let run = self.run_id.to_string();
        for root in &roots {
            log_event(
                HookEvent::DefinitionDiscovered,
                &[("root", root.as_str()), ("run_id", run.as_str())],
            );
        }

        PropertySnapshotStore::snapshot_and_strip(
            self.run_id,
            self.config.maintenance_properties(),
            store,
            roots,
        )
    }

    /// Write the recorded properties back and commit.
    ///
    /// Definitions the tracker saw changing get `reindex = true`. A failed
    /// commit is returned but nothing is undone: the content stays installed
    /// and the affected indexes may need a manual reindex.
    pub fn restore(&mut self, phase: Phase, store: &mut dyn PropertyStore) -> HookResult<()> {
        let (snapshot, tracker) = match mem::replace(&mut self.stage, Stage::Restored) {
            Stage::Prepared { snapshot, tracker } => (snapshot, tracker),
            other => {
                self.stage = other;
                return Err(HookError::InvalidPhase {
                    phase,
                    state: self.state(),
                });
            }
        };

        let run = self.run_id.to_string();
        tracker.close();
        let changed = tracker.changed();
        match snapshot.restore(store, &changed) {
            Ok(report) => {
                let marked = report.marked.len().to_string();
                let restored = report.restored.len().to_string();
                let skipped = report.skipped.len().to_string();
                log_event(
                    HookEvent::RestoreComplete,
                    &[
                        ("marked", marked.as_str()),
                        ("phase", phase.as_str()),
                        ("restored", restored.as_str()),
                        ("run_id", run.as_str()),
                        ("skipped", skipped.as_str()),
                    ],
                );
                self.report = Some(report);
                Ok(())
            }
            Err(e) => {
                let error = e.to_string();
                log_event(
                    HookEvent::RestoreFailed,
                    &[("error", error.as_str()), ("run_id", run.as_str())],
                );
                Err(HookError::Restore(e))
            }
        }
    }

    /// Drop the in-memory state after the installer reported a failure
    pub fn abort(&mut self, phase: Phase) {
        if !self.state().is_prepared() {
            return;
        }
        if let Some(tracker) = self.tracker() {
            tracker.close();
        }
        let definitions = self.snapshot().map_or(0, PropertySnapshotStore::len).to_string();
        let run = self.run_id.to_string();
        log_event(
            HookEvent::InstallAborted,
            &[
                ("definitions", definitions.as_str()),
                ("phase", phase.as_str()),
                ("run_id", run.as_str()),
            ],
        );
        self.stage = Stage::Aborted;
    }
}

impl InstallHook for ReindexInstallHook {
    fn execute(&mut self, context: &mut InstallContext<'_>) -> HookResult<()> {
        match context.phase {
            Phase::Prepare => self.prepare(context.store, context.coverage, context.listeners),
            Phase::Installed => self.restore(Phase::Installed, context.store),
            Phase::End if self.state().is_prepared() => self.restore(Phase::End, context.store),
            Phase::End => Ok(()),
            Phase::PrepareFailed | Phase::InstallFailed => {
                self.abort(context.phase);
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for ReindexInstallHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReindexInstallHook")
            .field("run_id", &self.run_id)
            .field("state", &self.state())
            .finish()
    }
}
