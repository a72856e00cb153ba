//! Result types for target manager operations
//!
//! This module contains the output structures returned by [`crate::manager::TargetManager`].

use std::path::PathBuf;

use colored::Color;

use crate::configs::targets::TargetConfig;

/// Where the target definitions were loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for DefinitionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionSource::File(path) => write!(f, "{}", path.display()),
            DefinitionSource::Builtin => f.write_str("built-in targets"),
        }
    }
}

/// Information about a single defined target
#[derive(Debug, Clone)]
pub struct TargetInfo {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub commands: Vec<String>,
    pub is_default: bool,
    pub color: Color,
}

/// Result of listing the defined targets
#[derive(Debug)]
pub struct TargetListResult {
    pub name: Option<String>,
    pub source: DefinitionSource,
    pub targets: Vec<TargetInfo>,
}

/// Result of getting the prerequisite graph
#[derive(Debug)]
pub struct DependencyGraphResult {
    pub graph: petgraph::Graph<String, ()>,
}

/// What a completed run executed
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub targets_run: Vec<String>,
    pub commands_run: usize,
}

impl TargetInfo {
    pub fn from_config(target: &TargetConfig, position: usize, is_default: bool) -> Self {
        Self {
            name: target.name.clone(),
            description: target.description.clone(),
            dependencies: target.dependencies().to_vec(),
            commands: target.commands().iter().map(|c| c.to_string()).collect(),
            is_default,
            color: crate::targets::target_color(position),
        }
    }
}
