//! The loaded job definition shape.

use serde::{Deserialize, Serialize};

/// One job definition from a source file: a cron expression and the
/// command line it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntry {
    /// Cron expression, as written in the source.
    pub spec: String,
    /// Shell command line, verbatim.
    pub cmd: String,
}
