//! Built-in Python quality targets
//!
//! Used when the working directory has no definition file. `lint` comes first
//! and is therefore the default target.

use crate::configs::targets::{Command, TargetConfig, TargetsFileConfig};

pub const CHECK_SUCCESS_BANNER: &str = "All checks passed!";

fn target(name: &str, description: &str, dependencies: &[&str], commands: &[&str]) -> TargetConfig {
    TargetConfig {
        name: name.to_string(),
        description: Some(description.to_string()),
        dependencies: (!dependencies.is_empty())
            .then(|| dependencies.iter().map(|d| d.to_string()).collect()),
        commands: (!commands.is_empty()).then(|| {
            commands
                .iter()
                .map(|c| Command::Shell(c.to_string()))
                .collect()
        }),
    }
}

/// The default definition set: flake8, isort, black and mypy over the working directory
pub fn builtin_targets() -> TargetsFileConfig {
    let banner = format!("echo \"{}\"", CHECK_SUCCESS_BANNER);

    TargetsFileConfig {
        name: Some("python-quality".to_string()),
        description: Some("Style, formatting and type checks for a Python tree".to_string()),
        default: None,
        targets: vec![
            target("lint", "Report style violations", &[], &["flake8 ."]),
            target(
                "format",
                "Sort imports and reformat code in place",
                &[],
                &["isort .", "black ."],
            ),
            target(
                "format-check",
                "Report unsorted imports and unformatted code without writing",
                &[],
                &["isort --check-only --diff .", "black --check --diff ."],
            ),
            target("type-check", "Run the static type checker", &[], &["mypy ."]),
            target(
                "check",
                "Run every read-only check",
                &["lint", "format-check", "type-check"],
                &[banner.as_str()],
            ),
            target(
                "quality",
                "Format the tree, then run every check",
                &["format", "check"],
                &[],
            ),
            target(
                "pre-commit",
                "Formatting and style checks only",
                &["format-check", "lint"],
                &[],
            ),
        ],
    }
}
