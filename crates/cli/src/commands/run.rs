use anyhow::Result;
use colored::*;
use gatekeep_core::execution::RunOptions;
use gatekeep_core::manager::TargetManager;

pub async fn execute(manager: &TargetManager, targets: &[String], quiet: bool) -> Result<()> {
    let execution_plan = manager.get_execution_plan(targets)?;

    if !quiet {
        println!(
            "{} {}",
            "Running".bold(),
            execution_plan.requested.join(", ").cyan()
        );
    }

    let summary = manager
        .run(
            &execution_plan,
            RunOptions {
                dry_run: false,
                quiet,
            },
        )
        .await?;

    if !quiet {
        println!();
        println!(
            "{} {}",
            "✓".green().bold(),
            format!(
                "{} target(s), {} command(s) completed successfully!",
                summary.targets_run.len(),
                summary.commands_run
            )
            .green()
            .bold()
        );
    }

    Ok(())
}
