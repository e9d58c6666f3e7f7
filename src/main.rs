use argh::FromArgs;
use efficiency_plots::analysis::constants::*;
use efficiency_plots::driver::{run_jobs, DriverError, ExecutionMode};
use efficiency_plots::jobs::{JobError, PlotJob};
use efficiency_plots::settings::PlotSettings;
use log::{error, info};
use std::path::PathBuf;
use thiserror::Error;

/// Renders the diagnostic charts of the efficiency correction study
#[derive(FromArgs, Debug)]
pub struct Args {
    /// directory containing the generator's CSV files (default: .)
    #[argh(option, short = 'i', default = "PathBuf::from(\".\")")]
    input_dir: PathBuf,

    /// directory charts and reports are written to (default: .)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output_dir: PathBuf,

    /// lower edge of the histogram range (default: -2)
    #[argh(option, default = "HIST_LOW")]
    low: f64,

    /// upper edge of the histogram range (default: 6)
    #[argh(option, default = "HIST_HIGH")]
    high: f64,

    /// number of histogram edges (default: 50)
    #[argh(option, default = "HIST_EDGE_COUNT")]
    edges: usize,

    /// image width in pixels (default: 1200)
    #[argh(option, default = "IMAGE_WIDTH")]
    width: u32,

    /// image height in pixels (default: 800)
    #[argh(option, default = "IMAGE_HEIGHT")]
    height: u32,

    /// run only this job; repeatable (pdf:<name>, reco, approx, efficiency)
    #[argh(option)]
    only: Vec<PlotJob>,

    /// run jobs on a thread pool instead of one process each
    #[argh(switch)]
    threads: bool,

    /// run a single job in this process and exit
    #[argh(option)]
    job: Option<PlotJob>,
}

impl Args {
    fn to_settings(&self) -> PlotSettings {
        let mut settings = PlotSettings {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            hist_low: self.low,
            hist_high: self.high,
            edge_count: self.edges,
            width: self.width,
            height: self.height,
        };
        settings.sanitize();
        settings
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("{0}")]
    Driver(#[from] DriverError),

    #[error("{job} failed: {source}")]
    Job { job: PlotJob, source: JobError },

    #[error("{failed} of {total} plot jobs failed")]
    JobsFailed { failed: usize, total: usize },
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let settings = args.to_settings();

    if let Some(job) = args.job {
        return match job.run(&settings) {
            Ok(_) => Ok(()),
            Err(source) => {
                error!("{} failed: {}", job, source);
                Err(AppError::Job { job, source })
            }
        };
    }

    let jobs = if args.only.is_empty() {
        PlotJob::default_jobs()
    } else {
        args.only.clone()
    };
    let mode = if args.threads {
        ExecutionMode::Threads
    } else {
        ExecutionMode::Processes
    };

    info!(
        "Running {} plot jobs from {} into {}",
        jobs.len(),
        settings.input_dir.display(),
        settings.output_dir.display()
    );

    let report = run_jobs(&jobs, &settings, mode)?;
    println!("{}", report.format_summary_table());

    let failed = report.failed_count();
    if failed > 0 {
        return Err(AppError::JobsFailed {
            failed,
            total: jobs.len(),
        });
    }

    Ok(())
}
