//! High-level target management interface
//!
//! [`TargetManager`] is the primary entry point. It resolves where target
//! definitions come from, validates them once, and exposes listing, planning,
//! graph inspection and execution.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gatekeep_core::execution::RunOptions;
//! use gatekeep_core::manager::{TargetManager, TargetManagerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> gatekeep_core::types::GatekeepResult<()> {
//! let manager = TargetManager::new(TargetManagerConfig {
//!     root: PathBuf::from("."),
//!     definition_file: None,
//! })?;
//!
//! let plan = manager.get_execution_plan(&["check".to_string()])?;
//! manager.run(&plan, RunOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::configs::builtin::builtin_targets;
use crate::configs::targets::{parse_targets_config, TargetsFileConfig};
use crate::execution::plan::{resolve_execution_plan, ExecutionPlan};
use crate::execution::runner::{RunOptions, TargetRunner};
use crate::results::{
    DefinitionSource, DependencyGraphResult, RunSummary, TargetInfo, TargetListResult,
};
use crate::target_set::TargetSet;
use crate::types::{GatekeepError, GatekeepResult};

/// File looked up in the working directory when no definition file is given
pub const DEFINITION_FILE_NAME: &str = "gatekeep.yml";

/// Configuration for initializing a target manager
#[derive(Debug, Clone)]
pub struct TargetManagerConfig {
    /// Directory commands run in
    pub root: PathBuf,
    /// Explicit definition file; must exist when given
    pub definition_file: Option<PathBuf>,
}

/// Owns the validated target set for one invocation
pub struct TargetManager {
    pub root: PathBuf,
    pub source: DefinitionSource,
    pub targets: TargetSet,
}

impl TargetManager {
    pub fn new(config: TargetManagerConfig) -> GatekeepResult<Self> {
        if !config.root.is_dir() {
            return Err(GatekeepError::Config(format!(
                "Working directory {} does not exist",
                config.root.display()
            )));
        }

        let (source, file_config) =
            Self::load_definitions(&config.root, config.definition_file.as_deref())?;
        debug!(source = %source, "loaded target definitions");

        let targets = TargetSet::from_config(file_config).map_err(|e| match (&source, e) {
            (DefinitionSource::File(path), GatekeepError::Config(message)) => {
                GatekeepError::Config(format!("{}: {}", path.display(), message))
            }
            (_, e) => e,
        })?;

        Ok(Self {
            root: config.root,
            source,
            targets,
        })
    }

    /// List all targets in declaration order
    pub fn list_targets(&self) -> GatekeepResult<TargetListResult> {
        let default_name = self.targets.default_target().ok().map(|t| t.name.clone());

        let targets = self
            .targets
            .iter()
            .enumerate()
            .map(|(position, t)| {
                TargetInfo::from_config(t, position, default_name.as_deref() == Some(t.name.as_str()))
            })
            .collect();

        Ok(TargetListResult {
            name: self.targets.name().map(str::to_string),
            source: self.source.clone(),
            targets,
        })
    }

    /// Resolve the execution order for the requested targets (the default when empty)
    pub fn get_execution_plan(&self, requested: &[String]) -> GatekeepResult<ExecutionPlan> {
        resolve_execution_plan(&self.targets, requested)
    }

    /// Execute a plan in the working directory
    pub async fn run(&self, plan: &ExecutionPlan, options: RunOptions) -> GatekeepResult<RunSummary> {
        TargetRunner::new(&self.targets, &self.root, options)
            .run(plan)
            .await
    }

    /// Get the prerequisite graph
    pub fn get_dependency_graph(&self) -> GatekeepResult<DependencyGraphResult> {
        Ok(DependencyGraphResult {
            graph: self.targets.graph().clone(),
        })
    }

    fn load_definitions(
        root: &Path,
        definition_file: Option<&Path>,
    ) -> GatekeepResult<(DefinitionSource, TargetsFileConfig)> {
        let path = match definition_file {
            Some(path) if path.is_relative() => root.join(path),
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(DEFINITION_FILE_NAME);
                if !candidate.exists() {
                    return Ok((DefinitionSource::Builtin, builtin_targets()));
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            GatekeepError::Config(format!(
                "Failed to read target definitions {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = parse_targets_config(&content).map_err(|e| {
            GatekeepError::Config(format!(
                "Failed to parse target definitions {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok((DefinitionSource::File(path), config))
    }
}
