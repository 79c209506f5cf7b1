//! End-to-end: jobs created in the manager, fired by the scheduler,
//! executed through the real shell.

use std::sync::Arc;
use std::time::Duration;

use crontap_manager::{JobManager, JobState, ManagerConfig};
use crontap_schedule::Scheduler;

#[tokio::test(flavor = "multi_thread")]
async fn scheduler_fires_managed_jobs_end_to_end() {
    let manager = Arc::new(JobManager::new(ManagerConfig::default()));
    let ok = manager.create_job("true", "* * * * * *").unwrap();
    let bad = manager.create_job("false", "* * * * * *").unwrap();

    let scheduler = Scheduler::new();
    for job in manager.list() {
        scheduler
            .add_job(job.spec(), format!("job-{}", job.id()), job.clone())
            .unwrap();
    }

    manager.start();
    scheduler.start();

    // Every-second schedules; 2.5s guarantees at least one fire each.
    tokio::time::sleep(Duration::from_millis(2500)).await;

    scheduler.shutdown();
    assert!(manager.shutdown_with_grace(Duration::from_secs(5)).await);

    assert!(ok.runs_started() >= 1);
    assert_eq!(ok.state(), JobState::Succeeded);
    assert!(bad.runs_started() >= 1);
    assert_eq!(bad.state(), JobState::Failed);
}
