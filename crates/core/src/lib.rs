//! Gatekeep Core Library
//!
//! This is the core library for the gatekeep quality target runner. It loads
//! named targets (an ordered command list plus ordered prerequisites), orders
//! a requested target after its prerequisites and runs the commands one at a
//! time, stopping at the first failure.
//!
//! ## Architecture
//!
//! - [`manager`] - High-level interface used by the CLI
//! - [`execution`] - Dependency ordering, command execution and the sequential runner
//! - [`target_set`] - Validated, immutable target definitions
//! - [`configs`] - Definition file parsing and the built-in Python quality targets
//! - [`targets`] - Target display helpers
//! - [`results`] - Result types for manager operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gatekeep_core::manager::{TargetManager, TargetManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> gatekeep_core::types::GatekeepResult<()> {
//! let manager = TargetManager::new(TargetManagerConfig {
//!     root: PathBuf::from("."),
//!     definition_file: None,
//! })?;
//!
//! let targets = manager.list_targets()?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod manager;
pub mod results;
pub mod target_set;
pub mod targets;
pub mod types;

// Re-export the main types for easier usage
pub use manager::{TargetManager, TargetManagerConfig};
pub use types::{GatekeepError, GatekeepResult};
