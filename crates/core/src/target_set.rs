//! Validated target definitions
//!
//! A [`TargetSet`] is built once from a [`TargetsFileConfig`] and is read-only
//! afterwards. Construction enforces unique names, resolvable prerequisites and
//! an acyclic prerequisite graph.

use std::collections::{HashMap, HashSet};

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use tracing::debug;

use crate::configs::targets::{Command, TargetConfig, TargetsFileConfig};
use crate::types::{GatekeepError, GatekeepResult};

#[derive(Debug, Clone)]
pub struct TargetSet {
    name: Option<String>,
    targets: Vec<TargetConfig>,
    index: HashMap<String, usize>,
    default: Option<String>,
    graph: DiGraph<String, ()>,
}

impl TargetSet {
    pub fn from_config(config: TargetsFileConfig) -> GatekeepResult<Self> {
        let mut index = HashMap::new();
        for (position, target) in config.targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                return Err(GatekeepError::Config(format!(
                    "Target #{} has an empty name",
                    position + 1
                )));
            }
            if index.insert(target.name.clone(), position).is_some() {
                return Err(GatekeepError::Config(format!(
                    "Target '{}' is defined more than once",
                    target.name
                )));
            }
            let has_empty_command = target.commands().iter().any(|command| match command {
                Command::Shell(cmd) => cmd.trim().is_empty(),
                Command::Exec(argv) => argv.is_empty(),
            });
            if has_empty_command {
                return Err(GatekeepError::Config(format!(
                    "Target '{}' has an empty command",
                    target.name
                )));
            }
        }

        if let Some(default) = &config.default {
            if !index.contains_key(default) {
                return Err(GatekeepError::Config(format!(
                    "Default target '{}' is not defined",
                    default
                )));
            }
        }

        let graph = build_prerequisite_graph(&config.targets, &index)?;

        let cycles = find_cycles(&graph);
        if !cycles.is_empty() {
            return Err(GatekeepError::Config(format!(
                "Circular dependency detected: {}",
                describe_cycles(&cycles)
            )));
        }

        debug!(
            targets = config.targets.len(),
            "validated target definitions"
        );

        Ok(Self {
            name: config.name,
            targets: config.targets,
            index,
            default: config.default,
            graph,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&TargetConfig> {
        self.index.get(name).map(|&position| &self.targets[position])
    }

    /// Declaration position of a target
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Targets in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &TargetConfig> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The explicitly configured default, else the first declared target
    pub fn default_target(&self) -> GatekeepResult<&TargetConfig> {
        let name = match &self.default {
            Some(name) => name.as_str(),
            None => self
                .targets
                .first()
                .map(|t| t.name.as_str())
                .ok_or_else(|| GatekeepError::Target("No targets are defined".to_string()))?,
        };

        self.get(name)
            .ok_or_else(|| GatekeepError::Target(format!("Target '{}' not found", name)))
    }

    /// Names of all targets, in declaration order
    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.name.clone()).collect()
    }

    /// Prerequisite graph with an edge from each target to each of its prerequisites
    pub fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }
}

fn build_prerequisite_graph(
    targets: &[TargetConfig],
    index: &HashMap<String, usize>,
) -> GatekeepResult<DiGraph<String, ()>> {
    let mut graph = DiGraph::<String, ()>::with_capacity(targets.len(), 0);
    let nodes: Vec<NodeIndex> = targets
        .iter()
        .map(|target| graph.add_node(target.name.clone()))
        .collect();

    for (position, target) in targets.iter().enumerate() {
        for dep in target.dependencies() {
            let Some(&dep_position) = index.get(dep) else {
                return Err(GatekeepError::Config(format!(
                    "Target '{}' depends on '{}' which is not defined",
                    target.name, dep
                )));
            };
            graph.update_edge(nodes[position], nodes[dep_position], ());
        }
    }

    Ok(graph)
}

fn find_cycles(graph: &DiGraph<String, ()>) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() == 1 && !graph.contains_edge(component[0], component[0]) {
                return None;
            }
            cycle_through_first(graph, &component)
        })
        .collect();

    cycles.sort();
    cycles
}

/// A cycle inside `component` that starts and ends at its alphabetically first
/// target, following real prerequisite edges
fn cycle_through_first(
    graph: &DiGraph<String, ()>,
    component: &[NodeIndex],
) -> Option<Vec<String>> {
    let members: HashSet<NodeIndex> = component.iter().copied().collect();
    let start = *component.iter().min_by(|a, b| graph[**a].cmp(&graph[**b]))?;

    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    if !walk_back_to(graph, &members, start, start, &mut path, &mut visited) {
        return None;
    }

    Some(path.into_iter().map(|node| graph[node].clone()).collect())
}

fn walk_back_to(
    graph: &DiGraph<String, ()>,
    members: &HashSet<NodeIndex>,
    start: NodeIndex,
    current: NodeIndex,
    path: &mut Vec<NodeIndex>,
    visited: &mut HashSet<NodeIndex>,
) -> bool {
    let mut next_nodes: Vec<NodeIndex> = graph
        .neighbors(current)
        .filter(|node| members.contains(node))
        .collect();
    next_nodes.sort_by(|a, b| graph[*a].cmp(&graph[*b]));

    for next in next_nodes {
        if next == start {
            return true;
        }
        if visited.insert(next) {
            path.push(next);
            if walk_back_to(graph, members, start, next, path, visited) {
                return true;
            }
            path.pop();
        }
    }

    false
}

fn describe_cycles(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|cycle| {
            let mut path = cycle.clone();
            if let Some(first) = path.first().cloned() {
                path.push(first);
            }
            path.join(" -> ")
        })
        .collect::<Vec<_>>()
        .join("; ")
}
