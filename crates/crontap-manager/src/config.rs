//! Manager configuration.

use serde::{Deserialize, Serialize};

use crate::job::OverlapPolicy;

/// Manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Overlap policy applied to jobs created without an explicit one.
    #[serde(default)]
    pub default_overlap: OverlapPolicy,

    /// How long `shutdown` waits for in-flight runs, in seconds.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
}

fn default_shutdown_grace() -> u64 {
    30
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_overlap: OverlapPolicy::default(),
            shutdown_grace_secs: default_shutdown_grace(),
        }
    }
}
