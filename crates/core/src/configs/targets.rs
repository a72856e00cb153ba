use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::GatekeepResult;

/// A single command line of a target
///
/// A string runs through `sh -c`; a list is executed directly, with the first
/// element as the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Command {
    Shell(String),
    Exec(Vec<String>),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Shell(cmd) => f.write_str(cmd),
            Command::Exec(argv) => f.write_str(&argv.join(" ")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetConfig {
    pub name: String,
    pub description: Option<String>,
    /// Targets that run before this one, in order
    pub dependencies: Option<Vec<String>>,
    /// Commands run in order once all dependencies succeeded
    pub commands: Option<Vec<Command>>,
}

impl TargetConfig {
    pub fn dependencies(&self) -> &[String] {
        self.dependencies.as_deref().unwrap_or_default()
    }

    pub fn commands(&self) -> &[Command] {
        self.commands.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetsFileConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Target run when none is requested. Defaults to the first declared target.
    pub default: Option<String>,
    pub targets: Vec<TargetConfig>,
}

pub fn parse_targets_config(yaml_str: &str) -> GatekeepResult<TargetsFileConfig> {
    let config: TargetsFileConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

/// JSON schema of the definition file, pretty-printed
pub fn definition_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(TargetsFileConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shell_and_exec_commands() {
        let config = parse_targets_config(
            r#"
name: demo
targets:
  - name: lint
    commands:
      - flake8 .
      - ["ruff", "check", "."]
  - name: check
    dependencies: [lint]
"#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("demo"));
        assert_eq!(config.targets.len(), 2);
        assert_eq!(
            config.targets[0].commands(),
            &[
                Command::Shell("flake8 .".to_string()),
                Command::Exec(vec![
                    "ruff".to_string(),
                    "check".to_string(),
                    ".".to_string()
                ]),
            ]
        );
        assert_eq!(config.targets[1].dependencies(), &["lint".to_string()]);
        assert!(config.targets[1].commands().is_empty());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = parse_targets_config("targets:\n  - name: lint\n    cmd: flake8\n");
        assert!(err.is_err());
    }

    #[test]
    fn schema_describes_targets() {
        let schema = definition_schema().unwrap();
        assert!(schema.contains("\"targets\""));
        assert!(schema.contains("\"dependencies\""));
    }

    #[test]
    fn exec_command_displays_as_joined_argv() {
        let cmd = Command::Exec(vec!["mypy".to_string(), ".".to_string()]);
        assert_eq!(cmd.to_string(), "mypy .");
    }
}
