//! Job definition, state machine, and execution path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crontap_exec::CommandExecutor;
use crontap_schedule::{CronSchedule, Runnable};

use crate::flight::FlightTracker;

/// Unique job identifier, assigned by the manager in creation order
/// starting at 1. Never reused within a manager instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job lifecycle state, reflecting the most recent execution attempt.
///
/// `Idle -> Running -> Succeeded | Failed -> Running -> ...` with no
/// terminal state. Under overlapping runs the state is last-write-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Never run.
    Idle,
    /// An execution is in progress.
    Running,
    /// The last completed execution exited 0.
    Succeeded,
    /// The last completed execution exited non-zero or failed to spawn.
    Failed,
}

impl Default for JobState {
    fn default() -> Self {
        JobState::Idle
    }
}

/// What happens when a fire arrives while a prior run is still executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Every fire runs immediately and independently.
    Allow,
    /// A fire arriving mid-run is dropped and counted as skipped.
    Skip,
    /// Fires queue behind the in-flight run and execute one at a time.
    Serialize,
}

impl Default for OverlapPolicy {
    fn default() -> Self {
        OverlapPolicy::Allow
    }
}

/// Outcome of the most recent completed execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Whether the run counted as a success.
    pub success: bool,
    /// When the run finished.
    pub finished_at: DateTime<Local>,
    /// Wall-clock execution time.
    pub duration: std::time::Duration,
}

/// A registered job: an immutable command and schedule plus mutable
/// execution state.
///
/// Jobs are created by the manager, which hands out `Arc<Job>` views.
/// Everything visible through the accessors is read-only from outside;
/// state changes only through [`run`](Job::run).
pub struct Job {
    id: JobId,
    command: String,
    schedule: CronSchedule,
    policy: OverlapPolicy,
    state: RwLock<JobState>,
    last_run: RwLock<Option<RunRecord>>,
    runs_started: AtomicU64,
    runs_succeeded: AtomicU64,
    runs_failed: AtomicU64,
    runs_skipped: AtomicU64,
    run_gate: tokio::sync::Mutex<()>,
    executor: Arc<dyn CommandExecutor>,
    flight: Arc<FlightTracker>,
    shutting_down: Arc<AtomicBool>,
}

impl Job {
    pub(crate) fn new(
        id: JobId,
        command: String,
        schedule: CronSchedule,
        policy: OverlapPolicy,
        executor: Arc<dyn CommandExecutor>,
        flight: Arc<FlightTracker>,
        shutting_down: Arc<AtomicBool>,
    ) -> Self {
        Self {
            id,
            command,
            schedule,
            policy,
            state: RwLock::new(JobState::Idle),
            last_run: RwLock::new(None),
            runs_started: AtomicU64::new(0),
            runs_succeeded: AtomicU64::new(0),
            runs_failed: AtomicU64::new(0),
            runs_skipped: AtomicU64::new(0),
            run_gate: tokio::sync::Mutex::new(()),
            executor,
            flight,
            shutting_down,
        }
    }

    /// Job identifier.
    pub fn id(&self) -> JobId {
        self.id
    }

    /// The exact command string, as registered.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The schedule expression, as registered.
    pub fn spec(&self) -> &str {
        self.schedule.expr()
    }

    /// The parsed schedule.
    pub fn schedule(&self) -> &CronSchedule {
        &self.schedule
    }

    /// Overlap policy for this job.
    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Current lifecycle state.
    pub fn state(&self) -> JobState {
        *self.state.read()
    }

    /// Most recent completed run, if any.
    pub fn last_run(&self) -> Option<RunRecord> {
        self.last_run.read().clone()
    }

    /// Executions begun.
    pub fn runs_started(&self) -> u64 {
        self.runs_started.load(Ordering::SeqCst)
    }

    /// Executions that exited 0.
    pub fn runs_succeeded(&self) -> u64 {
        self.runs_succeeded.load(Ordering::SeqCst)
    }

    /// Executions that exited non-zero or failed to spawn.
    pub fn runs_failed(&self) -> u64 {
        self.runs_failed.load(Ordering::SeqCst)
    }

    /// Fires dropped by the `Skip` overlap policy.
    pub fn runs_skipped(&self) -> u64 {
        self.runs_skipped.load(Ordering::SeqCst)
    }

    /// Fire the job once, honoring its overlap policy.
    ///
    /// Blocks the caller for the duration of the execution. Never returns
    /// an error and never panics: spawn failures and non-zero exits are
    /// recorded on the job and logged, so a misbehaving command cannot
    /// take the scheduler down with it.
    pub async fn run(&self) {
        let _flight = self.flight.begin();

        if self.shutting_down.load(Ordering::SeqCst) {
            debug!("Job {} fire declined: manager is shutting down", self.id);
            return;
        }

        match self.policy {
            OverlapPolicy::Allow => self.execute_once().await,
            OverlapPolicy::Skip => match self.run_gate.try_lock() {
                Ok(_guard) => self.execute_once().await,
                Err(_) => {
                    self.runs_skipped.fetch_add(1, Ordering::SeqCst);
                    debug!("Job {} fire skipped: previous run still in flight", self.id);
                }
            },
            OverlapPolicy::Serialize => {
                let _guard = self.run_gate.lock().await;
                self.execute_once().await;
            }
        }
    }

    /// Execute the command once and record the outcome.
    async fn execute_once(&self) {
        self.runs_started.fetch_add(1, Ordering::SeqCst);
        *self.state.write() = JobState::Running;
        debug!("Job {} running: {}", self.id, self.command);

        match self.executor.execute(&self.command).await {
            Ok(result) => {
                for line in result.stdout.lines() {
                    info!("Job {} stdout: {}", self.id, line);
                }
                for line in result.stderr.lines() {
                    warn!("Job {} stderr: {}", self.id, line);
                }

                let record = RunRecord {
                    exit_code: result.exit_code,
                    success: result.success(),
                    finished_at: Local::now(),
                    duration: result.duration,
                };

                if record.success {
                    self.runs_succeeded.fetch_add(1, Ordering::SeqCst);
                    *self.state.write() = JobState::Succeeded;
                    info!("Job {} succeeded in {:?}", self.id, record.duration);
                } else {
                    self.runs_failed.fetch_add(1, Ordering::SeqCst);
                    *self.state.write() = JobState::Failed;
                    error!(
                        "Job {} failed with exit code {:?}",
                        self.id, record.exit_code
                    );
                }

                *self.last_run.write() = Some(record);
            }
            Err(e) => {
                self.runs_failed.fetch_add(1, Ordering::SeqCst);
                *self.state.write() = JobState::Failed;
                *self.last_run.write() = Some(RunRecord {
                    exit_code: None,
                    success: false,
                    finished_at: Local::now(),
                    duration: std::time::Duration::ZERO,
                });
                error!("Job {} could not be spawned: {}", self.id, e);
            }
        }
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("command", &self.command)
            .field("spec", &self.spec())
            .field("policy", &self.policy)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Runnable for Job {
    async fn run(&self) {
        Job::run(self).await;
    }
}
