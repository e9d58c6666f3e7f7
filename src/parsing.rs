//! File parsing functionality for generator output
//!
//! This module loads the flat numeric arrays written by the generator. Every
//! file is a header-less, comma-delimited list of numbers; usually a single
//! line, but any number of records is accepted and flattened in order.

use crate::analysis::{CurveError, PdfCurve};
use log::warn;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Invalid curve: {0}")]
    Curve(#[from] CurveError),
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Name of the file holding the domain of curve `name`
pub fn domain_file_name(name: &str) -> String {
    format!("domain_{}.csv", name)
}

/// Name of the file holding the values of curve `name`
pub fn values_file_name(name: &str) -> String {
    format!("vals_{}.csv", name)
}

/// Parses every field of a comma-delimited file into a flat array
///
/// Empty or non-numeric fields become NaN, the same way `np.genfromtxt`
/// fills missing values; the number of such fields is logged as a warning.
/// `nan`, `inf` and `-inf` are accepted.
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// * `Ok(Vec<f64>)` - All values in file order
/// * `Err(ParsingError)` - If the file could not be opened or read
pub fn parse_csv_values(path: &Path) -> Result<Vec<f64>> {
    let file = File::open(path).map_err(|source| ParsingError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut values = Vec::new();
    let mut missing = 0usize;

    for record in reader.records() {
        let record = record.map_err(|source| ParsingError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        for field in record.iter() {
            match field.parse::<f64>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    missing += 1;
                    values.push(f64::NAN);
                }
            }
        }
    }

    if missing > 0 {
        warn!(
            "{}: {} empty or non-numeric field(s) read as NaN",
            path.display(),
            missing
        );
    }

    Ok(values)
}

/// Loads a sample set from `file_name` inside `dir`
pub fn load_samples(dir: &Path, file_name: &str) -> Result<Vec<f64>> {
    parse_csv_values(&dir.join(file_name))
}

/// Loads curve `name` from its `domain_<name>.csv` and `vals_<name>.csv` pair
///
/// # Returns
/// * `Ok(PdfCurve)` - The paired curve
/// * `Err(ParsingError)` - If either file is unreadable or their lengths differ
pub fn load_pdf_curve(dir: &Path, name: &str) -> Result<PdfCurve> {
    let domain = parse_csv_values(&dir.join(domain_file_name(name)))?;
    let values = parse_csv_values(&dir.join(values_file_name(name)))?;

    Ok(PdfCurve::new(name, domain, values)?)
}
