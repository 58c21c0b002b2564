//! Installation test framework
//!
//! Provides:
//! - A simulated package installer over `MemorySession`
//! - Package fixtures modelled on real index definitions
//! - A recording host listener

pub mod fixtures;

pub use fixtures::*;
pub use harness::*;
