//! Schedule errors.

use thiserror::Error;

/// Schedule error types.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The cron expression does not parse.
    #[error("Invalid cron expression {expr:?}: {source}")]
    InvalidExpression {
        expr: String,
        #[source]
        source: cron::error::Error,
    },

    /// Entries cannot be added once the scheduler has started.
    #[error("Scheduler already started")]
    AlreadyStarted,
}
