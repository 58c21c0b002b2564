//! Per-phase installation context

use super::phase::Phase;
use crate::definition::CoverageSource;
use crate::listener::ListenerSlot;
use crate::store::PropertyStore;

/// What the installer hands to a hook for one phase
pub struct InstallContext<'a> {
    /// Phase being signalled
    pub phase: Phase,
    /// The installation's uncommitted session
    pub store: &'a mut dyn PropertyStore,
    /// Paths the package covers
    pub coverage: &'a dyn CoverageSource,
    /// The installer's listener slot
    pub listeners: &'a mut ListenerSlot,
}

impl<'a> InstallContext<'a> {
    /// Bundle the collaborators for one phase
    pub fn new(
        phase: Phase,
        store: &'a mut dyn PropertyStore,
        coverage: &'a dyn CoverageSource,
        listeners: &'a mut ListenerSlot,
    ) -> Self {
        Self {
            phase,
            store,
            coverage,
            listeners,
        }
    }
}
