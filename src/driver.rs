//! Fans the plot jobs out and waits for all of them
//!
//! By default every job runs in its own OS process: the driver re-executes
//! the current binary with `--job <name>`, starts every child, then waits for
//! all of them. Children share nothing, so one failing job never affects the
//! others. [`ExecutionMode::Threads`] runs the same jobs on the rayon pool
//! instead.

use crate::jobs::PlotJob;
use crate::settings::PlotSettings;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};
use rayon::prelude::*;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Child, Command};
use tabled::{Table, Tabled};
use thiserror::Error;

/// Errors that prevent the driver from starting any job
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Failed to locate the current executable: {0}")]
    CurrentExe(std::io::Error),

    #[error("Failed to create output directory: {0}")]
    OutputDir(std::io::Error),
}

type Result<T> = core::result::Result<T, DriverError>;

/// How jobs are isolated from each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One child process per job
    #[default]
    Processes,
    /// One rayon task per job, inside this process
    Threads,
}

/// Final state of a single job
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Succeeded,
    Failed(String),
}

/// A job together with how it ended
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub job: PlotJob,
    pub status: JobStatus,
}

/// Outcomes of every job, in launch order
#[derive(Debug, Clone, PartialEq)]
pub struct DriverReport {
    pub outcomes: Vec<JobOutcome>,
}

#[derive(Tabled)]
struct JobSummaryRow {
    #[tabled(rename = "Job")]
    job: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl DriverReport {
    pub fn succeeded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == JobStatus::Succeeded)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.succeeded_count()
    }

    /// Formats the outcomes as an ASCII table
    pub fn format_summary_table(&self) -> String {
        let rows: Vec<JobSummaryRow> = self
            .outcomes
            .iter()
            .map(|outcome| match &outcome.status {
                JobStatus::Succeeded => JobSummaryRow {
                    job: outcome.job.to_string(),
                    status: "ok",
                    detail: String::new(),
                },
                JobStatus::Failed(reason) => JobSummaryRow {
                    job: outcome.job.to_string(),
                    status: "failed",
                    detail: reason.clone(),
                },
            })
            .collect();

        format!(
            "Plot Jobs ({} ok, {} failed)\n{}",
            self.succeeded_count(),
            self.failed_count(),
            Table::new(rows)
        )
    }
}

/// Runs every job in `jobs` and waits for all of them to finish.
///
/// Job failures are recorded in the report; only problems that stop the
/// driver itself are returned as errors.
pub fn run_jobs(
    jobs: &[PlotJob],
    settings: &PlotSettings,
    mode: ExecutionMode,
) -> Result<DriverReport> {
    fs::create_dir_all(&settings.output_dir).map_err(DriverError::OutputDir)?;

    let progress = create_progress_bar(jobs.len());
    let outcomes = match mode {
        ExecutionMode::Processes => {
            let exe = std::env::current_exe().map_err(DriverError::CurrentExe)?;
            run_in_processes(&exe, jobs, settings, &progress)
        }
        ExecutionMode::Threads => run_in_threads(jobs, settings, &progress),
    };
    progress.finish_and_clear();

    for outcome in &outcomes {
        if let JobStatus::Failed(reason) = &outcome.status {
            error!("{} failed: {}", outcome.job, reason);
        }
    }

    Ok(DriverReport { outcomes })
}

/// Command line that makes a child run exactly `job` with `settings`.
pub fn child_args(job: &PlotJob, settings: &PlotSettings) -> Vec<OsString> {
    vec![
        "--job".into(),
        job.to_string().into(),
        "--input-dir".into(),
        settings.input_dir.clone().into_os_string(),
        "--output-dir".into(),
        settings.output_dir.clone().into_os_string(),
        "--low".into(),
        settings.hist_low.to_string().into(),
        "--high".into(),
        settings.hist_high.to_string().into(),
        "--edges".into(),
        settings.edge_count.to_string().into(),
        "--width".into(),
        settings.width.to_string().into(),
        "--height".into(),
        settings.height.to_string().into(),
    ]
}

/// Starts one `exe` child per job, then waits for every child.
pub fn run_in_processes(
    exe: &Path,
    jobs: &[PlotJob],
    settings: &PlotSettings,
    progress: &ProgressBar,
) -> Vec<JobOutcome> {
    // Start everything first so the jobs overlap.
    let started: Vec<(PlotJob, std::io::Result<Child>)> = jobs
        .iter()
        .map(|job| {
            debug!("Spawning {} for {}", exe.display(), job);
            let child = Command::new(exe).args(child_args(job, settings)).spawn();
            (job.clone(), child)
        })
        .collect();

    started
        .into_iter()
        .map(|(job, child)| {
            let status = match child {
                Ok(mut child) => match child.wait() {
                    Ok(exit) if exit.success() => JobStatus::Succeeded,
                    Ok(exit) => JobStatus::Failed(format!("process {}", exit)),
                    Err(e) => JobStatus::Failed(format!("failed to wait for process: {}", e)),
                },
                Err(e) => JobStatus::Failed(format!("failed to start process: {}", e)),
            };

            progress.inc(1);
            JobOutcome { job, status }
        })
        .collect()
}

/// Runs every job on the rayon pool.
pub fn run_in_threads(
    jobs: &[PlotJob],
    settings: &PlotSettings,
    progress: &ProgressBar,
) -> Vec<JobOutcome> {
    jobs.par_iter()
        .map(|job| {
            let status = match job.run(settings) {
                Ok(_) => JobStatus::Succeeded,
                Err(e) => JobStatus::Failed(e.to_string()),
            };

            progress.inc(1);
            JobOutcome {
                job: job.clone(),
                status,
            }
        })
        .collect()
}

fn create_progress_bar(len: usize) -> ProgressBar {
    let progress = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} plot jobs") {
        progress.set_style(style.progress_chars("=> "));
    }

    progress
}
