//! High-level target runner
//!
//! Walks an [`ExecutionPlan`] strictly in order, one command at a time, and
//! stops at the first failure.

use std::path::Path;

use colored::*;
use tracing::info;

use crate::execution::command::{CommandExecutor, InterruptListener};
use crate::execution::plan::ExecutionPlan;
use crate::results::RunSummary;
use crate::target_set::TargetSet;
use crate::targets::color_for;
use crate::types::{GatekeepError, GatekeepResult};

/// Options controlling how a plan is executed
#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions {
    /// Print what would run without running anything
    pub dry_run: bool,
    /// Suppress target headers and command echo. Tool output is never suppressed.
    pub quiet: bool,
}

/// Sequential runner for the targets of one invocation
pub struct TargetRunner<'a> {
    targets: &'a TargetSet,
    root: &'a Path,
    options: RunOptions,
}

impl<'a> TargetRunner<'a> {
    pub fn new(targets: &'a TargetSet, root: &'a Path, options: RunOptions) -> Self {
        Self {
            targets,
            root,
            options,
        }
    }

    /// Run every target of the plan; the first failing command aborts the rest
    pub async fn run(&self, plan: &ExecutionPlan) -> GatekeepResult<RunSummary> {
        let mut summary = RunSummary::default();
        let mut interrupt = if self.options.dry_run {
            None
        } else {
            Some(InterruptListener::install()?)
        };

        for target_name in &plan.order {
            let target = self.targets.get(target_name).ok_or_else(|| {
                GatekeepError::Target(format!("Target '{}' not found", target_name))
            })?;

            self.print_header(target_name, target.commands().len());

            let executor = CommandExecutor::new(self.root, target_name);
            for command in target.commands() {
                if !self.options.quiet || self.options.dry_run {
                    println!("{} {}", "$".bright_black(), command.to_string().dimmed());
                }
                let Some(interrupt) = interrupt.as_mut() else {
                    continue;
                };

                executor.execute(command, interrupt).await?;
                summary.commands_run += 1;
            }

            info!(target_name = %target_name, "target completed");
            summary.targets_run.push(target_name.clone());
        }

        Ok(summary)
    }

    fn print_header(&self, target_name: &str, command_count: usize) {
        if self.options.quiet && !self.options.dry_run {
            return;
        }

        let color = color_for(self.targets, target_name);
        let verb = if self.options.dry_run {
            "Would run"
        } else {
            "Running"
        };

        println!();
        println!(
            "┌─ {} {}",
            format!("{} target", verb).bold(),
            format!("'{}'", target_name).color(color).bold()
        );
        if command_count == 0 {
            println!("└─ {}", "no commands".bright_black());
        } else {
            println!(
                "└─ {} {}",
                "Commands:".bright_black(),
                command_count.to_string().bright_black()
            );
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::configs::targets::parse_targets_config;
    use crate::execution::plan::resolve_execution_plan;

    /// Target set whose commands append their target name to `log.txt`
    fn logging_targets(fail_in: Option<&str>) -> TargetSet {
        let step = |name: &str| {
            if Some(name) == fail_in {
                format!("      - echo {name} >> log.txt\n      - exit 4\n      - echo after-{name} >> log.txt\n")
            } else {
                format!("      - echo {name} >> log.txt\n")
            }
        };

        let yaml = format!(
            r#"
targets:
  - name: lint
    commands:
{lint}  - name: format
    commands:
{format}  - name: format-check
    commands:
{format_check}  - name: type-check
    commands:
{type_check}  - name: check
    dependencies: [lint, format-check, type-check]
    commands:
{check}  - name: quality
    dependencies: [format, check]
  - name: pre-commit
    dependencies: [format-check, lint]
"#,
            lint = step("lint"),
            format = step("format"),
            format_check = step("format-check"),
            type_check = step("type-check"),
            check = step("check"),
        );

        TargetSet::from_config(parse_targets_config(&yaml).unwrap()).unwrap()
    }

    fn read_log(dir: &Path) -> Vec<String> {
        std::fs::read_to_string(dir.join("log.txt"))
            .unwrap_or_default()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    async fn run(
        set: &TargetSet,
        dir: &Path,
        target: &str,
        options: RunOptions,
    ) -> GatekeepResult<RunSummary> {
        let plan = resolve_execution_plan(set, &[target.to_string()]).unwrap();
        TargetRunner::new(set, dir, options).run(&plan).await
    }

    #[tokio::test]
    async fn prerequisites_run_before_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let set = logging_targets(None);

        let summary = run(&set, dir.path(), "check", RunOptions::default())
            .await
            .unwrap();

        assert_eq!(
            read_log(dir.path()),
            vec!["lint", "format-check", "type-check", "check"]
        );
        assert_eq!(summary.commands_run, 4);
        assert_eq!(summary.targets_run.last().map(String::as_str), Some("check"));
    }

    #[tokio::test]
    async fn failure_stops_siblings_and_later_targets() {
        let dir = tempfile::tempdir().unwrap();
        let set = logging_targets(Some("format-check"));

        let err = run(&set, dir.path(), "check", RunOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 4);
        assert_eq!(read_log(dir.path()), vec!["lint", "format-check"]);
    }

    #[tokio::test]
    async fn check_does_not_run_when_a_prerequisite_fails() {
        let dir = tempfile::tempdir().unwrap();
        let set = logging_targets(Some("type-check"));

        run(&set, dir.path(), "check", RunOptions::default())
            .await
            .unwrap_err();

        let log = read_log(dir.path());
        assert!(!log.contains(&"check".to_string()));
    }

    #[tokio::test]
    async fn pre_commit_passes_with_only_type_errors() {
        let dir = tempfile::tempdir().unwrap();
        let set = logging_targets(Some("type-check"));

        run(&set, dir.path(), "pre-commit", RunOptions::default())
            .await
            .unwrap();
        assert_eq!(read_log(dir.path()), vec!["format-check", "lint"]);

        let err = run(&set, dir.path(), "check", RunOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn quality_formats_before_format_check() {
        let dir = tempfile::tempdir().unwrap();
        let set = logging_targets(None);

        run(&set, dir.path(), "quality", RunOptions::default())
            .await
            .unwrap();

        assert_eq!(
            read_log(dir.path()),
            vec!["format", "lint", "format-check", "type-check", "check"]
        );
    }

    #[tokio::test]
    async fn dry_run_executes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let set = logging_targets(Some("lint"));

        let summary = run(
            &set,
            dir.path(),
            "quality",
            RunOptions {
                dry_run: true,
                quiet: false,
            },
        )
        .await
        .unwrap();

        assert!(read_log(dir.path()).is_empty());
        assert_eq!(summary.commands_run, 0);
        assert_eq!(summary.targets_run.len(), 6);
    }

    /// Target set where format-check uses `sort -c` and format rewrites with `sort -o`
    fn sorting_targets() -> TargetSet {
        TargetSet::from_config(
            parse_targets_config(
                r#"
targets:
  - name: lint
    commands: ["true"]
  - name: format
    commands:
      - sort -o module.py module.py
  - name: format-check
    commands:
      - sort -c module.py
  - name: type-check
    commands: ["true"]
  - name: check
    dependencies: [lint, format-check, type-check]
  - name: quality
    dependencies: [format, check]
"#,
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn quality_passes_when_only_fixable_style_issues_exist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("module.py"), "import sys\nimport os\n").unwrap();
        let set = sorting_targets();
        let quiet = RunOptions {
            dry_run: false,
            quiet: true,
        };

        assert!(run(&set, dir.path(), "check", quiet).await.is_err());

        let summary = run(&set, dir.path(), "quality", quiet).await.unwrap();
        assert_eq!(
            summary.targets_run,
            vec!["format", "lint", "format-check", "type-check", "check", "quality"]
        );
    }

    /// Format rewrites a file that format-check rejects until it has been rewritten
    #[tokio::test]
    async fn format_fixes_what_format_check_rejects() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("module.py"), "import sys\nimport os\n").unwrap();
        let set = TargetSet::from_config(
            parse_targets_config(
                r#"
targets:
  - name: format-check
    commands:
      - sort -c module.py
  - name: format
    commands:
      - sort -o module.py module.py
"#,
            )
            .unwrap(),
        )
        .unwrap();
        let quiet = RunOptions {
            dry_run: false,
            quiet: true,
        };

        assert!(run(&set, dir.path(), "format-check", quiet).await.is_err());
        run(&set, dir.path(), "format", quiet).await.unwrap();
        run(&set, dir.path(), "format-check", quiet).await.unwrap();

        let rewritten = std::fs::read_to_string(dir.path().join("module.py")).unwrap();
        assert_eq!(rewritten, "import os\nimport sys\n");
    }
}
