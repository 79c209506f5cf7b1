//! Shell-backed command executor.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::error::ExecError;
use crate::executor::{CommandExecutor, ExecutionResult};

/// Executor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Shell binary override. Defaults to the platform shell.
    #[serde(default)]
    pub shell: Option<String>,

    /// String prepended to every command, e.g. `python manage.py`.
    #[serde(default)]
    pub command_prefix: Option<String>,
}

/// Executes commands through the platform shell so pipes and redirection
/// in crontab command strings work as written.
///
/// Commands run to completion with no timeout; a hung command occupies
/// its execution context until it exits.
pub struct ShellExecutor {
    config: ExecConfig,
}

impl ShellExecutor {
    pub fn new(config: ExecConfig) -> Self {
        Self { config }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(ExecConfig::default())
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command: &str) -> Result<ExecutionResult, ExecError> {
        let command = match &self.config.command_prefix {
            Some(prefix) if !prefix.is_empty() => format!("{} {}", prefix, command),
            _ => command.to_string(),
        };

        // Determine shell based on platform
        let (default_shell, flag) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        let shell = self.config.shell.as_deref().unwrap_or(default_shell);

        debug!("Executing via {}: {}", shell, command);

        let start = Instant::now();
        let output = Command::new(shell)
            .arg(flag)
            .arg(&command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(ExecutionResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
