use anyhow::Result;
use colored::*;
use gatekeep_core::manager::TargetManager;
use gatekeep_core::targets::target_color;

pub fn execute(manager: &TargetManager) -> Result<()> {
    println!("{}", "Target Dependency Graph:".bold().underline());

    let result = manager.get_dependency_graph()?;
    let graph = &result.graph;

    if graph.node_count() == 0 {
        println!("No targets defined");
        return Ok(());
    }

    for node_index in graph.node_indices() {
        let name = &graph[node_index];
        // Nodes are added in declaration order
        println!("{}", name.color(target_color(node_index.index())).bold());

        // Edges point at prerequisites; declaration order is kept by the target itself
        let deps = manager
            .targets
            .get(name)
            .map(|t| t.dependencies().to_vec())
            .unwrap_or_default();

        if !deps.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), deps.join(", "));
        } else {
            println!("  {}", "no dependencies".dimmed());
        }
        println!();
    }

    Ok(())
}
