//! crontap binary: load a job file, schedule every entry, run until
//! SIGINT/SIGTERM, then drain in-flight runs.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crontap_exec::{ExecConfig, ShellExecutor};
use crontap_manager::{JobManager, ManagerConfig, OverlapPolicy};
use crontap_schedule::Scheduler;
use crontap_tabfile::load_path;

#[derive(Parser)]
#[command(name = "crontap")]
#[command(about = "Cron-style job runner")]
#[command(version)]
struct Cli {
    /// Job definition file (crontab text, or YAML with .yaml/.yml)
    #[arg(short, long, env = "CRON_FILE", default_value = "crontab")]
    file: PathBuf,

    /// Log at debug level
    #[arg(short, long, env = "CRON_VERBOSE")]
    verbose: bool,

    /// Prefix prepended to every command before it reaches the shell
    #[arg(long, env = "CRON_CMD_PREFIX")]
    cmd_prefix: Option<String>,

    /// What to do when a fire overlaps a still-running execution
    #[arg(long, value_enum, default_value = "allow")]
    overlap: OverlapArg,

    /// Seconds to wait for in-flight runs on shutdown
    #[arg(long, default_value_t = 30)]
    grace_period: u64,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OverlapArg {
    Allow,
    Skip,
    Serialize,
}

impl From<OverlapArg> for OverlapPolicy {
    fn from(arg: OverlapArg) -> Self {
        match arg {
            OverlapArg::Allow => OverlapPolicy::Allow,
            OverlapArg::Skip => OverlapPolicy::Skip,
            OverlapArg::Serialize => OverlapPolicy::Serialize,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting crontap v{}", env!("CARGO_PKG_VERSION"));

    let entries = match load_path(&cli.file) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to load {}: {}", cli.file.display(), e);
            return Err(e.into());
        }
    };
    if entries.is_empty() {
        warn!("No entries found in {}", cli.file.display());
    }

    let exec_config = ExecConfig {
        command_prefix: cli.cmd_prefix,
        ..Default::default()
    };
    let manager_config = ManagerConfig {
        default_overlap: cli.overlap.into(),
        shutdown_grace_secs: cli.grace_period,
    };

    let executor = Arc::new(ShellExecutor::new(exec_config));
    let manager = Arc::new(JobManager::with_executor(manager_config, executor));
    let scheduler = Scheduler::new();

    for entry in entries {
        let job = match manager.create_job(&entry.cmd, &entry.spec) {
            Ok(job) => job,
            Err(e) => {
                error!("Skipping entry [{}] {}: {}", entry.spec, entry.cmd, e);
                continue;
            }
        };

        if let Err(e) = scheduler.add_job(job.spec(), format!("job-{}", job.id()), job.clone()) {
            error!("Skipping job {}: {}", job.id(), e);
        }
    }

    manager.start();
    scheduler.start();
    print_job_table(&manager);

    wait_for_shutdown().await;

    info!("Shutting down...");
    scheduler.shutdown();
    if !manager.shutdown().await {
        warn!("Exiting with runs still in flight");
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn print_job_table(manager: &JobManager) {
    let jobs = manager.list();
    if jobs.is_empty() {
        return;
    }

    println!("Jobs added:");
    println!("{:<4} {:<20} {:<40} {}", "ID", "SPEC", "NEXT", "CMD");
    println!("{}", "-".repeat(90));
    for job in jobs {
        let next = match job.schedule().next_after(Local::now()) {
            Some(next) => format!(
                "{} ({})",
                humanize_delta(next - Local::now()),
                next.format("%Y-%m-%d %H:%M:%S")
            ),
            None => "never".to_string(),
        };
        println!("{:<4} {:<20} {:<40} {}", job.id(), job.spec(), next, job.command());
    }
}

fn humanize_delta(delta: chrono::Duration) -> String {
    let secs = delta.num_seconds().max(0);
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("in {}h{}m{}s", h, m, s)
    } else if m > 0 {
        format!("in {}m{}s", m, s)
    } else {
        format!("in {}s", s)
    }
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
            _ = sigterm.recv() => info!("Received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl-C");
    }
}
