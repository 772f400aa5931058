//! Local command execution.
//!
//! Runs one opaque shell command string as a child process, captures both
//! output streams verbatim, logs them, and propagates the first failure.

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::{CraftopsError, Result};

/// Captured output of one completed command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}

/// Capability to run one local command to completion.
///
/// The backup invoker takes this as a seam so its sequencing is observable
/// with a recording double in tests.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion, capturing stdout and stderr.
    async fn run(&self, command: &str) -> Result<CommandOutput>;
}

/// Runs commands through the platform shell in the current working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput> {
        if command.trim().is_empty() {
            return Err(CraftopsError::EmptyCommand);
        }

        debug!(%command, "running local command");

        let output = shell_command(command).output().await.map_err(|e| {
            error!(%command, error = %e, "failed to spawn command");
            CraftopsError::Io(e)
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            error!(%command, status = %output.status, %stderr, "command failed");
            return Err(CraftopsError::ExecutionFailed(format!(
                "`{}` ({}): {}",
                command,
                output.status,
                stderr.trim()
            )));
        }

        info!("stdout: {}", stdout);
        info!("stderr: {}", stderr);

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code: output.status.code(),
        })
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
