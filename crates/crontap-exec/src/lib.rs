//! # crontap-exec
//!
//! Shell command execution for crontap jobs.
//!
//! ## Features
//!
//! - `CommandExecutor`: the execution seam jobs call through
//! - `ShellExecutor`: `sh -c` / `cmd /C` runner with captured output
//! - Non-zero exit codes are results, not errors

pub mod error;
pub mod executor;
pub mod shell;

pub use error::ExecError;
pub use executor::{CommandExecutor, ExecutionResult};
pub use shell::{ExecConfig, ShellExecutor};
