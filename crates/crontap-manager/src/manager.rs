//! Job registry and lifecycle.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crontap_exec::{CommandExecutor, ShellExecutor};
use crontap_schedule::CronSchedule;

use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::flight::FlightTracker;
use crate::job::{Job, JobId, OverlapPolicy};

/// Registry interior. Id allocation and the job map share one lock so a
/// creation is a single atomic unit and failed creations burn no ids.
struct Registry {
    jobs: BTreeMap<JobId, Arc<Job>>,
    next_id: u64,
}

/// Owns job identity and lifecycle.
///
/// Jobs are created through [`create_job`](JobManager::create_job), fired
/// by the trigger through their `Runnable` impl, and listed in creation
/// order. Execution failures stay inside the jobs; only creation errors
/// surface to callers.
pub struct JobManager {
    config: ManagerConfig,
    executor: Arc<dyn CommandExecutor>,
    registry: RwLock<Registry>,
    running: AtomicBool,
    shutting_down: Arc<AtomicBool>,
    flight: Arc<FlightTracker>,
}

impl JobManager {
    /// Create a manager with the default shell executor.
    pub fn new(config: ManagerConfig) -> Self {
        Self::with_executor(config, Arc::new(ShellExecutor::default()))
    }

    /// Create a manager with a custom executor.
    pub fn with_executor(config: ManagerConfig, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            config,
            executor,
            registry: RwLock::new(Registry {
                jobs: BTreeMap::new(),
                next_id: 1,
            }),
            running: AtomicBool::new(false),
            shutting_down: Arc::new(AtomicBool::new(false)),
            flight: Arc::new(FlightTracker::new()),
        }
    }

    /// Register a job under the manager's default overlap policy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCommand` if `command` is empty or whitespace, and
    /// `InvalidSchedule` if `spec` does not parse. A failed creation
    /// leaves the registry untouched and allocates no id.
    pub fn create_job(&self, command: &str, spec: &str) -> Result<Arc<Job>, ManagerError> {
        self.create_job_with_policy(command, spec, self.config.default_overlap)
    }

    /// Register a job with an explicit overlap policy.
    pub fn create_job_with_policy(
        &self,
        command: &str,
        spec: &str,
        policy: OverlapPolicy,
    ) -> Result<Arc<Job>, ManagerError> {
        if command.trim().is_empty() {
            return Err(ManagerError::InvalidCommand);
        }

        let schedule =
            CronSchedule::parse(spec).map_err(|source| ManagerError::InvalidSchedule {
                expr: spec.to_string(),
                source,
            })?;

        let mut registry = self.registry.write();
        let id = JobId(registry.next_id);
        registry.next_id += 1;

        let job = Arc::new(Job::new(
            id,
            command.to_string(),
            schedule,
            policy,
            self.executor.clone(),
            self.flight.clone(),
            self.shutting_down.clone(),
        ));
        registry.jobs.insert(id, job.clone());
        drop(registry);

        info!("Created job {} [{}]: {}", id, job.spec(), job.command());
        Ok(job)
    }

    /// Mark the manager running. Idempotent; does not fire anything
    /// itself, the trigger does.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("Manager already started");
            return;
        }
        info!("Manager started with {} jobs", self.len());
    }

    /// Whether `start` has been called and `stop` has not.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Decline further fires. In-flight runs are abandoned to finish on
    /// their own; use [`shutdown`](JobManager::shutdown) to wait for them.
    pub fn stop(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
        if self.running.swap(false, Ordering::SeqCst) {
            info!("Manager stopped");
        }
    }

    /// Stop, then wait for in-flight runs using the configured grace
    /// period.
    pub async fn shutdown(&self) -> bool {
        self.shutdown_with_grace(Duration::from_secs(self.config.shutdown_grace_secs))
            .await
    }

    /// Stop, then wait up to `grace` for in-flight runs to finish.
    ///
    /// Returns `true` when everything drained, `false` when the grace
    /// period lapsed and the stragglers were abandoned.
    pub async fn shutdown_with_grace(&self, grace: Duration) -> bool {
        self.stop();

        let active = self.flight.active();
        if active > 0 {
            info!("Waiting up to {:?} for {} in-flight run(s)", grace, active);
        }

        match tokio::time::timeout(grace, self.flight.wait_idle()).await {
            Ok(()) => {
                info!("All in-flight runs drained");
                true
            }
            Err(_) => {
                warn!(
                    "Grace period lapsed with {} run(s) still in flight",
                    self.flight.active()
                );
                false
            }
        }
    }

    /// Jobs in creation order.
    pub fn list(&self) -> Vec<Arc<Job>> {
        self.registry.read().jobs.values().cloned().collect()
    }

    /// Look up a job by id.
    pub fn get(&self, id: JobId) -> Option<Arc<Job>> {
        self.registry.read().jobs.get(&id).cloned()
    }

    /// Number of registered jobs.
    pub fn len(&self) -> usize {
        self.registry.read().jobs.len()
    }

    /// Whether no jobs are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.read().jobs.is_empty()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
