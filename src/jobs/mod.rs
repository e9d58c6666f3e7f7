//! The individual plotting routines
//!
//! Each [`PlotJob`] reads its own input files and writes its own outputs; no
//! job depends on another. Jobs have a textual name (see [`PlotJob::from_str`])
//! so the driver can hand one to a child process on the command line.

pub mod efficiency;
pub mod pdf;
pub mod samples;

use crate::analysis::constants::PDF_NAMES;
use crate::analysis::BinningError;
use crate::common::PlotError;
use crate::parsing::ParsingError;
use crate::settings::PlotSettings;
use bytesize::ByteSize;
use log::info;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Reconstructed samples drawn from `f * efficiency`
pub const F_SAMPLES_FILE: &str = "fsamples.csv";

/// Reconstructed samples drawn from `g * efficiency`
pub const G_SAMPLES_FILE: &str = "gsamples.csv";

/// Samples drawn from the approximate generating PDF
pub const APPROX_SAMPLES_FILE: &str = "approxsamples.csv";

pub const RECO_PLOT_FILE: &str = "recoSamples.png";
pub const APPROX_PLOT_FILE: &str = "approxSamples.png";
pub const EFFICIENCY_PLOT_FILE: &str = "measured_efficiency.png";
pub const EFFICIENCY_TABLE_FILE: &str = "measured_efficiency.txt";
pub const EFFICIENCY_JSON_FILE: &str = "measured_efficiency.json";

/// Prefix of the textual name of a [`PlotJob::Pdf`] job
const PDF_JOB_PREFIX: &str = "pdf:";

/// Errors that can occur while running a plot job
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Binning error: {0}")]
    Binning(#[from] BinningError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

type Result<T> = core::result::Result<T, JobError>;

/// Errors that can occur when reading a job name
#[derive(Error, Debug, PartialEq)]
pub enum ParseJobError {
    #[error("Unknown plot job '{0}' (expected pdf:<name>, reco, approx or efficiency)")]
    Unknown(String),

    #[error("Invalid curve name '{0}'")]
    InvalidCurveName(String),
}

/// One independent rendering routine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlotJob {
    /// Line plot of the curve stored in `domain_<name>.csv` / `vals_<name>.csv`
    Pdf(String),
    /// Histograms of the `f` and `g` reconstructed samples and their union
    Reco,
    /// Histogram of the approximate samples against the reconstructed union
    Approx,
    /// Measured efficiency with uncertainties against the true efficiency
    Efficiency,
}

impl PlotJob {
    /// Every job the generator's output supports, in launch order.
    pub fn default_jobs() -> Vec<PlotJob> {
        PDF_NAMES
            .iter()
            .map(|name| PlotJob::Pdf(name.to_string()))
            .chain([PlotJob::Reco, PlotJob::Approx, PlotJob::Efficiency])
            .collect()
    }

    /// Runs the job and returns the paths of the files it wrote.
    pub fn run(&self, settings: &PlotSettings) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&settings.output_dir)?;

        let outputs = match self {
            PlotJob::Pdf(name) => pdf::plot_pdf(name, settings)?,
            PlotJob::Reco => samples::plot_reco(settings)?,
            PlotJob::Approx => samples::plot_approx(settings)?,
            PlotJob::Efficiency => efficiency::plot_efficiency(settings)?,
        };

        for path in &outputs {
            log_written(path);
        }

        Ok(outputs)
    }
}

impl fmt::Display for PlotJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotJob::Pdf(name) => write!(f, "{}{}", PDF_JOB_PREFIX, name),
            PlotJob::Reco => write!(f, "reco"),
            PlotJob::Approx => write!(f, "approx"),
            PlotJob::Efficiency => write!(f, "efficiency"),
        }
    }
}

impl FromStr for PlotJob {
    type Err = ParseJobError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(PDF_JOB_PREFIX) {
            // The name becomes part of file names.
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

            return if valid {
                Ok(PlotJob::Pdf(name.to_string()))
            } else {
                Err(ParseJobError::InvalidCurveName(name.to_string()))
            };
        }

        match s {
            "reco" => Ok(PlotJob::Reco),
            "approx" => Ok(PlotJob::Approx),
            "efficiency" => Ok(PlotJob::Efficiency),
            _ => Err(ParseJobError::Unknown(s.to_string())),
        }
    }
}

fn log_written(path: &Path) {
    match fs::metadata(path) {
        Ok(metadata) => info!("Saved {} ({})", path.display(), ByteSize(metadata.len())),
        Err(_) => info!("Saved {}", path.display()),
    }
}
