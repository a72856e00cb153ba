//! Command execution utilities
//!
//! Every command runs as a blocking child process in the working directory with
//! inherited stdio, so a tool's own output and exit code reach the user as-is.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command as ProcessCommand;
use tracing::debug;

use crate::configs::targets::Command;
use crate::types::{GatekeepError, GatekeepResult};

pub const TARGET_ENV: &str = "GATEKEEP_TARGET";
pub const ROOT_ENV: &str = "GATEKEEP_ROOT";

/// Ctrl-C listener held for a whole run
///
/// The handler is registered when the listener is installed, so an interrupt
/// that arrives between two commands is kept until the next check.
pub struct InterruptListener {
    #[cfg(unix)]
    signal: tokio::signal::unix::Signal,
    #[cfg(windows)]
    signal: tokio::signal::windows::CtrlC,
}

impl InterruptListener {
    pub fn install() -> GatekeepResult<Self> {
        #[cfg(unix)]
        let signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(windows)]
        let signal = tokio::signal::windows::ctrl_c()?;

        Ok(Self { signal })
    }

    /// Wait for the next interrupt
    pub async fn recv(&mut self) {
        self.signal.recv().await;
    }

    /// Whether an interrupt arrived since the last check, without waiting for one
    pub async fn is_pending(&mut self) -> bool {
        // Let the signal driver run so an interrupt delivered just now is seen.
        tokio::task::yield_now().await;
        tokio::select! {
            biased;
            _ = self.recv() => true,
            _ = std::future::ready(()) => false,
        }
    }
}

/// Runs the commands of one target
pub struct CommandExecutor<'a> {
    root: &'a Path,
    target: &'a str,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(root: &'a Path, target: &'a str) -> Self {
        Self { root, target }
    }

    /// Run a command to completion; any non-zero exit becomes an error carrying its code
    pub async fn execute(
        &self,
        command: &Command,
        interrupt: &mut InterruptListener,
    ) -> GatekeepResult<()> {
        if interrupt.is_pending().await {
            return Err(self.interrupted(command));
        }

        let mut process = match command {
            Command::Shell(cmd) => {
                let mut process = ProcessCommand::new("sh");
                process.arg("-c").arg(cmd);
                process
            }
            Command::Exec(argv) => {
                let (program, args) = argv.split_first().ok_or_else(|| {
                    GatekeepError::Config(format!(
                        "Target '{}' has an empty command",
                        self.target
                    ))
                })?;
                let mut process = ProcessCommand::new(program);
                process.args(args);
                process
            }
        };

        process
            .current_dir(self.root)
            .env(TARGET_ENV, self.target)
            .env(ROOT_ENV, self.root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        debug!(target_name = self.target, command = %command, "spawning command");

        let mut child = process.spawn().map_err(|source| GatekeepError::Spawn {
            target: self.target.to_string(),
            command: command.to_string(),
            source,
        })?;

        let waited = tokio::select! {
            status = child.wait() => Some(status?),
            _ = interrupt.recv() => None,
        };

        let Some(status) = waited else {
            // The child may already be gone if it received the same SIGINT.
            let _ = child.kill().await;
            return Err(self.interrupted(command));
        };

        debug!(target_name = self.target, command = %command, ?status, "command finished");

        if status.success() {
            return Ok(());
        }

        Err(GatekeepError::CommandFailed {
            target: self.target.to_string(),
            command: command.to_string(),
            code: exit_code(status),
        })
    }

    fn interrupted(&self, command: &Command) -> GatekeepError {
        GatekeepError::Interrupted {
            target: self.target.to_string(),
            command: command.to_string(),
        }
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
