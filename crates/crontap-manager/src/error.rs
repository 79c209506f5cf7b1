//! Manager errors.

use thiserror::Error;

use crontap_schedule::ScheduleError;

/// Job creation error types.
///
/// These surface synchronously from `create_job` and leave the registry
/// untouched. Execution failures never appear here; they are recorded on
/// the job itself.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The command string is empty or whitespace.
    #[error("Invalid command: must not be empty")]
    InvalidCommand,

    /// The schedule expression does not parse.
    #[error("Invalid schedule {expr:?}: {source}")]
    InvalidSchedule {
        expr: String,
        #[source]
        source: ScheduleError,
    },
}
