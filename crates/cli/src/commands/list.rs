use anyhow::Result;
use colored::*;
use gatekeep_core::manager::TargetManager;

pub fn execute(manager: &TargetManager) -> Result<()> {
    let result = manager.list_targets()?;

    let heading = match &result.name {
        Some(name) => format!("Targets: {}", name),
        None => "Targets".to_string(),
    };
    println!(
        "{} {}",
        heading.bold().underline(),
        format!("({})", result.source).dimmed()
    );

    if result.targets.is_empty() {
        println!("  {}", "No targets defined".dimmed());
        return Ok(());
    }

    for target in &result.targets {
        let marker = if target.is_default {
            format!(" {}", "[default]".green())
        } else {
            String::new()
        };
        println!("{}{}", target.name.color(target.color).bold(), marker);

        if let Some(description) = &target.description {
            println!("  {}", description);
        }
        if !target.dependencies.is_empty() {
            println!(
                "  {} {}",
                "depends on:".dimmed(),
                target.dependencies.join(", ")
            );
        }
        for command in &target.commands {
            println!("  {} {}", "$".bright_black(), command.dimmed());
        }
    }

    Ok(())
}
