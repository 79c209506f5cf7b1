//! # crontap-schedule
//!
//! Cron expression parsing and trigger loops.
//!
//! ## Features
//!
//! - `CronSchedule`: cron grammar wrapper accepting 5-field, 6/7-field,
//!   and `@shorthand` expressions
//! - `Runnable`: the single-method contract the scheduler fires
//! - `Scheduler`: one timer loop per entry, one spawned task per fire

pub mod error;
pub mod expr;
pub mod scheduler;

pub use error::ScheduleError;
pub use expr::CronSchedule;
pub use scheduler::{Runnable, Scheduler};
