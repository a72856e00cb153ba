//! Target execution module
//!
//! This module handles dependency ordering of requested targets, the
//! execution of their commands and the reporting around it.

pub mod command;
pub mod plan;
pub mod runner;

pub use command::CommandExecutor;
pub use plan::{resolve_execution_plan, ExecutionPlan};
pub use runner::{RunOptions, TargetRunner};
