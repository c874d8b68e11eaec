use crate::core::lib::{AgentError, AgentResult, CommandExecutor};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd", "/C");
#[cfg(not(windows))]
const SHELL: (&str, &str) = ("sh", "-c");

/// Hands command lines to the platform shell untouched.
///
/// Quoting, globbing and builtins are whatever that shell does. There is no
/// timeout and no sandbox.
#[derive(Debug)]
pub struct ShellCommandExecutor {
    shell: &'static str,
    flag: &'static str,
}

impl ShellCommandExecutor {
    pub fn new() -> Self {
        let (shell, flag) = SHELL;
        Self { shell, flag }
    }
}

impl Default for ShellCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CommandExecutor for ShellCommandExecutor {
    async fn execute<'a>(&'a self, command: &'a str) -> AgentResult<String> {
        // stdin stays with the prompt, not the child
        let output = Command::new(self.shell)
            .arg(self.flag)
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        debug!(status = ?output.status, stdout = stdout.len(), stderr = stderr.len(), "command finished");

        if output.status.success() {
            Ok(stdout)
        } else {
            Err(AgentError::CommandFailed {
                code: output.status.code(),
                stderr,
            })
        }
    }
}
