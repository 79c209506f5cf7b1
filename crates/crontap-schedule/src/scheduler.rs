//! Trigger loops that fire registered runnables on their cron schedules.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::ScheduleError;
use crate::expr::CronSchedule;

/// Anything the scheduler can fire.
///
/// One call per fire, each on its own task. Implementations must not
/// panic; a fire that fails is theirs to record.
#[async_trait]
pub trait Runnable: Send + Sync {
    async fn run(&self);
}

/// One registered schedule entry.
struct Entry {
    schedule: CronSchedule,
    label: String,
    runnable: Arc<dyn Runnable>,
}

/// Cron trigger.
///
/// Entries are registered before [`start`](Scheduler::start); starting
/// spawns one timer loop per entry, and each fire spawns the runnable on
/// its own task so a long run never delays subsequent fires.
pub struct Scheduler {
    entries: Mutex<Vec<Entry>>,
    shutdown: broadcast::Sender<()>,
    started: AtomicBool,
    running: AtomicBool,
    fire_count: Arc<AtomicU64>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        let (shutdown, _) = broadcast::channel(16);
        Self {
            entries: Mutex::new(Vec::new()),
            shutdown,
            started: AtomicBool::new(false),
            running: AtomicBool::new(false),
            fire_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register a runnable under a cron expression.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExpression` if the expression does not parse, or
    /// `AlreadyStarted` once `start` has been called.
    pub fn add_job(
        &self,
        expr: &str,
        label: impl Into<String>,
        runnable: Arc<dyn Runnable>,
    ) -> Result<(), ScheduleError> {
        let schedule = CronSchedule::parse(expr)?;
        let label = label.into();

        let mut entries = self.entries.lock();
        if self.started.load(Ordering::SeqCst) {
            return Err(ScheduleError::AlreadyStarted);
        }
        debug!("Scheduling {} on [{}]", label, schedule);
        entries.push(Entry {
            schedule,
            label,
            runnable,
        });
        Ok(())
    }

    /// Spawn one timer loop per registered entry. Idempotent.
    pub fn start(&self) {
        // The flag flips under the entries lock; a racing add_job either
        // lands before this take or errors AlreadyStarted.
        let entries = {
            let mut entries = self.entries.lock();
            if self.started.swap(true, Ordering::SeqCst) {
                debug!("Scheduler already started");
                return;
            }
            std::mem::take(&mut *entries)
        };
        self.running.store(true, Ordering::SeqCst);

        info!("Scheduler started with {} entries", entries.len());

        for entry in entries {
            let shutdown = self.shutdown.subscribe();
            let fire_count = self.fire_count.clone();
            tokio::spawn(entry_loop(entry, shutdown, fire_count));
        }
    }

    /// Stop all timer loops. Fires already spawned keep running.
    pub fn shutdown(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        info!("Scheduler shutting down");
        let _ = self.shutdown.send(());
    }

    /// Whether `start` has been called and `shutdown` has not.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Total fires across all entries.
    pub fn fire_count(&self) -> u64 {
        self.fire_count.load(Ordering::Relaxed)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer loop for one entry: sleep until the next fire time, spawn the
/// runnable, repeat until shutdown.
async fn entry_loop(
    entry: Entry,
    mut shutdown: broadcast::Receiver<()>,
    fire_count: Arc<AtomicU64>,
) {
    loop {
        let Some(next) = entry.schedule.next_after(Local::now()) else {
            warn!(
                "Schedule [{}] for {} has no upcoming fire, parking",
                entry.schedule, entry.label
            );
            let _ = shutdown.recv().await;
            return;
        };

        let wait = (next - Local::now()).to_std().unwrap_or(Duration::ZERO);
        debug!("Next fire for {} at {}", entry.label, next);

        tokio::select! {
            _ = shutdown.recv() => {
                debug!("Timer loop for {} stopped", entry.label);
                return;
            }
            _ = tokio::time::sleep(wait) => {
                fire_count.fetch_add(1, Ordering::Relaxed);
                debug!("Firing {}", entry.label);
                let runnable = entry.runnable.clone();
                tokio::spawn(async move {
                    runnable.run().await;
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
