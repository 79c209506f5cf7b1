//! Execution seam between jobs and the underlying process machinery.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ExecError;

/// Outcome of one command execution.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Process exit code. `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Wall-clock execution time.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs shell commands on behalf of jobs.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute `command` to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns `ExecError::Spawn` only when the command cannot be
    /// launched. A launched command that fails is reported through the
    /// result, not as an error.
    async fn execute(&self, command: &str) -> Result<ExecutionResult, ExecError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_means_exit_zero() {
        let mut result = ExecutionResult {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            duration: Duration::ZERO,
        };
        assert!(result.success());

        result.exit_code = Some(1);
        assert!(!result.success());

        result.exit_code = None;
        assert!(!result.success());
    }
}
