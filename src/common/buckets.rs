//! Per-bin rows and ASCII table formatting for the efficiency report
//!
//! This module provides:
//! - [`BinEntry`] for one histogram bin of the efficiency measurement
//! - ASCII table formatting using the [`tabled`] crate
//!
//! Rows are created by [`crate::analysis::EfficiencyEstimate::create_bin_entries`].

use tabled::{Table, Tabled};

/// Represents a single bin with its counts and rescaled efficiency
#[derive(Debug, Clone, Tabled)]
pub struct BinEntry {
    /// Bin centre, formatted to three decimals
    #[tabled(rename = "Centre")]
    pub centre: String,
    /// Number of reconstructed samples in this bin
    #[tabled(rename = "True")]
    pub true_count: u64,
    /// Number of approximate samples in this bin
    #[tabled(rename = "Approx")]
    pub approx_count: u64,
    /// Rescaled efficiency
    #[tabled(rename = "Efficiency")]
    pub efficiency: String,
    /// Rescaled uncertainty
    #[tabled(rename = "Uncertainty")]
    pub uncertainty: String,
}

impl BinEntry {
    /// Creates a new bin entry with formatted numbers
    pub fn new(
        centre: f64,
        true_count: u64,
        approx_count: u64,
        efficiency: f64,
        uncertainty: f64,
    ) -> Self {
        Self {
            centre: format!("{:.3}", centre),
            true_count,
            approx_count,
            efficiency: format!("{:.4}", efficiency),
            uncertainty: format!("{:.4}", uncertainty),
        }
    }
}

/// Formats bin entries as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `bins` - A slice of [`BinEntry`] to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_bin_table(bins: &[BinEntry], title: Option<&str>) -> String {
    if bins.is_empty() {
        return "No bins available".to_string();
    }

    let table = Table::new(bins).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
