//! # crontap-manager
//!
//! Job registry and lifecycle management.
//!
//! ## Features
//!
//! - Atomic job creation with validated command and schedule
//! - Monotonic ids and creation-order listing
//! - Per-job overlap policies (allow, skip, serialize)
//! - Graceful shutdown with bounded in-flight drain

pub mod config;
pub mod error;
mod flight;
pub mod job;
pub mod manager;

pub use config::ManagerConfig;
pub use error::ManagerError;
pub use job::{Job, JobId, JobState, OverlapPolicy, RunRecord};
pub use manager::JobManager;
