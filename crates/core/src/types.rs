use thiserror::Error;

/// Exit code used when a command cannot be started, matching what a shell reports.
pub const EXIT_SPAWN_FAILED: i32 = 127;
/// Exit code used when the run is interrupted with Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;
/// Exit code used for configuration and unknown-target errors.
pub const EXIT_USAGE: i32 = 2;

/// The main error type for gatekeep operations
#[derive(Debug, Error)]
pub enum GatekeepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Target error: {0}")]
    Target(String),

    #[error("Target '{target}': command `{command}` failed with exit code {code}")]
    CommandFailed {
        target: String,
        command: String,
        code: i32,
    },

    #[error("Target '{target}': failed to execute command `{command}`: {source}")]
    Spawn {
        target: String,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Target '{target}': interrupted while running `{command}`")]
    Interrupted { target: String, command: String },
}

impl GatekeepError {
    /// Process exit code the dispatcher should terminate with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GatekeepError::CommandFailed { code, .. } => *code,
            GatekeepError::Spawn { .. } => EXIT_SPAWN_FAILED,
            GatekeepError::Interrupted { .. } => EXIT_INTERRUPTED,
            GatekeepError::Config(_) | GatekeepError::Target(_) | GatekeepError::Yaml(_) => {
                EXIT_USAGE
            }
            GatekeepError::Io(_) => 1,
        }
    }
}

/// Result type alias for gatekeep operations
pub type GatekeepResult<T> = Result<T, GatekeepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_keeps_the_tool_exit_code() {
        let err = GatekeepError::CommandFailed {
            target: "lint".to_string(),
            command: "flake8 .".to_string(),
            code: 3,
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("flake8 ."));
    }

    #[test]
    fn configuration_errors_are_usage_errors() {
        assert_eq!(
            GatekeepError::Config("bad".to_string()).exit_code(),
            EXIT_USAGE
        );
        assert_eq!(
            GatekeepError::Target("missing".to_string()).exit_code(),
            EXIT_USAGE
        );
    }
}
