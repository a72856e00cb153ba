use anyhow::Result;
use colored::*;
use gatekeep_core::execution::RunOptions;
use gatekeep_core::manager::TargetManager;

pub async fn execute(manager: &TargetManager, targets: &[String]) -> Result<()> {
    let execution_plan = manager.get_execution_plan(targets)?;

    println!(
        "{} {}",
        "Execution plan for".bold(),
        execution_plan.requested.join(", ").cyan()
    );

    println!("\n{}:", "Execution order".bold());
    for (i, target) in execution_plan.order.iter().enumerate() {
        println!("  {}. {}", i + 1, target);
    }

    manager
        .run(
            &execution_plan,
            RunOptions {
                dry_run: true,
                quiet: false,
            },
        )
        .await?;

    Ok(())
}
