//! Execution errors.

use thiserror::Error;

/// Execution error types.
///
/// Only failures to launch surface here. A command that starts and exits
/// non-zero is a normal `ExecutionResult`.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The command could not be spawned at all.
    #[error("Failed to spawn command: {0}")]
    Spawn(#[from] std::io::Error),
}
