//! Install hook
//!
//! The installer calls `InstallHook::execute` once per lifecycle phase.
//! `ReindexInstallHook` is the only implementation in this crate.
//!
//! # Error policy
//!
//! - PREPARE failures are fatal: the installer must abort before content is
//!   written
//! - A failure on one definition root is logged and that root is skipped
//! - A failing restore commit is surfaced but never undoes installed content

mod context;
mod errors;
mod orchestrator;
mod phase;

pub use context::InstallContext;
pub use errors::{HookError, HookResult};
pub use orchestrator::ReindexInstallHook;
pub use phase::{HookState, Phase};

/// A participant in the installer's phase lifecycle
pub trait InstallHook {
    /// Handle one phase
    fn execute(&mut self, context: &mut InstallContext<'_>) -> HookResult<()>;
}
