//! Target dependency ordering
//!
//! Prerequisites are walked depth-first, left to right, and each target is
//! placed after everything it depends on. A target appears at most once per
//! plan no matter how many paths reach it.

use std::collections::HashSet;

use tracing::debug;

use crate::target_set::TargetSet;
use crate::types::{GatekeepError, GatekeepResult};

/// Ordered list of targets to execute for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Targets as requested, after applying the default
    pub requested: Vec<String>,
    /// Every target to run, prerequisites first
    pub order: Vec<String>,
}

/// Resolve the execution order for `requested`, or for the default target when empty
pub fn resolve_execution_plan(
    targets: &TargetSet,
    requested: &[String],
) -> GatekeepResult<ExecutionPlan> {
    let requested = if requested.is_empty() {
        vec![targets.default_target()?.name.clone()]
    } else {
        requested.to_vec()
    };

    for name in &requested {
        if !targets.contains(name) {
            return Err(GatekeepError::Target(format!(
                "Target '{}' not found. Available targets: {}",
                name,
                targets.names().join(", ")
            )));
        }
    }

    let mut visited = HashSet::new();
    let mut order = Vec::new();
    for name in &requested {
        visit(targets, name, &mut visited, &mut order)?;
    }

    debug!(requested = ?requested, order = ?order, "resolved execution plan");

    Ok(ExecutionPlan { requested, order })
}

fn visit(
    targets: &TargetSet,
    name: &str,
    visited: &mut HashSet<String>,
    order: &mut Vec<String>,
) -> GatekeepResult<()> {
    if !visited.insert(name.to_string()) {
        return Ok(());
    }

    let target = targets
        .get(name)
        .ok_or_else(|| GatekeepError::Target(format!("Target '{}' not found", name)))?;

    for dep in target.dependencies() {
        visit(targets, dep, visited, order)?;
    }

    order.push(name.to_string());
    Ok(())
}
