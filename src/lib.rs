//! reindex-hook - flags changed index definitions for reindexing during
//! content-package installation
//!
//! A package may carry index definitions (children of an `oak:index`
//! container). When the package changes such a definition, the index has to
//! be rebuilt; when it merely rewrites it unchanged, it must not be.
//!
//! The hook works in three steps:
//!
//! 1. PREPARE: discover the definitions in the package coverage, then record
//!    and transiently remove their `reindex` / `reindexCount` properties so
//!    the installer's own diff does not report them as modified
//! 2. Installation: a `ChangeTracker`, composed into the installer's
//!    listener slot, collects the definitions that really changed
//! 3. INSTALLED / END: restore the recorded properties, forcing `reindex`
//!    to `true` for changed definitions, and commit once
//!
//! # Modules
//!
//! - `definition`: path classification, coverage, discovery
//! - `listener`: progress listeners, composition, change tracking
//! - `store`: property store access and maintenance property snapshots
//! - `hook`: the phase-driven install hook
//! - `config`: configurable literals
//! - `observability`: structured logging

pub mod config;
pub mod definition;
pub mod hook;
pub mod listener;
pub mod observability;
pub mod store;

pub use config::{ConfigError, HookConfig};
pub use definition::{DefinitionRoot, PathClassifier};
pub use hook::{HookError, HookState, InstallContext, InstallHook, Phase, ReindexInstallHook};
pub use listener::{ActionCode, ChangeTracker, CompoundListener, ListenerSlot, Mode, ProgressListener};
pub use store::{MemorySession, PropertyStore, PropertyValue, RestoreReport};
