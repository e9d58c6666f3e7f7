//! Measured efficiency versus the true efficiency
//!
//! Besides the chart this job writes the per-bin numbers twice: as an ASCII
//! table for reading and as JSON for further processing.

use super::{
    Result, APPROX_SAMPLES_FILE, EFFICIENCY_JSON_FILE, EFFICIENCY_PLOT_FILE,
    EFFICIENCY_TABLE_FILE, F_SAMPLES_FILE, G_SAMPLES_FILE,
};
use crate::analysis::constants::EFFICIENCY_CURVE;
use crate::analysis::{BinEdges, EfficiencyEstimate, PdfCurve};
use crate::common::buckets::format_bin_table;
use crate::common::plots::{create_efficiency_plot, PlotLabels};
use crate::parsing::{load_pdf_curve, load_samples};
use crate::settings::PlotSettings;
use log::warn;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

/// JSON layout of `measured_efficiency.json`
#[derive(Debug, Serialize)]
struct EfficiencyReport<'a> {
    bin_edges: &'a [f64],
    reference_domain: &'a [f64],
    reference_values: &'a [f64],
    #[serde(flatten)]
    estimate: &'a EfficiencyEstimate,
}

/// Measures the efficiency from the sample files and plots it over the true curve
///
/// The true curve is normalized to unit mean; the measurement is rescaled by
/// its mean ratio (see [`EfficiencyEstimate`]).
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Paths of the table, JSON report and chart
/// * `Err(JobError)` - If loading, writing or rendering failed
pub fn plot_efficiency(settings: &PlotSettings) -> Result<Vec<PathBuf>> {
    let edges = settings.bin_edges()?;
    let reference = load_pdf_curve(&settings.input_dir, EFFICIENCY_CURVE)?.normalized_to_unit_mean();

    let f_samples = load_samples(&settings.input_dir, F_SAMPLES_FILE)?;
    let g_samples = load_samples(&settings.input_dir, G_SAMPLES_FILE)?;
    let approx_samples = load_samples(&settings.input_dir, APPROX_SAMPLES_FILE)?;

    let estimate = EfficiencyEstimate::estimate(&[&f_samples, &g_samples], &approx_samples, &edges);

    let non_finite = estimate.non_finite_bins();
    if non_finite > 0 {
        warn!(
            "{} of {} efficiency bins are not finite (empty approximate bins?); scale = {}",
            non_finite,
            estimate.bin_count(),
            estimate.scale
        );
    }

    let mut outputs = write_efficiency_reports(&reference, &estimate, &edges, settings)?;

    let plot_path = settings.output_dir.join(EFFICIENCY_PLOT_FILE);
    create_efficiency_plot(
        &reference,
        &estimate,
        &PlotLabels {
            title: "Measured Efficiency",
            x_label: "x",
            y_label: "Efficiency (unit mean)",
        },
        &plot_path,
        settings.image_size(),
    )?;
    outputs.push(plot_path);

    Ok(outputs)
}

/// Writes the ASCII table and the JSON report for `estimate`
pub(crate) fn write_efficiency_reports(
    reference: &PdfCurve,
    estimate: &EfficiencyEstimate,
    edges: &BinEdges,
    settings: &PlotSettings,
) -> Result<Vec<PathBuf>> {
    let table = format_bin_table(
        &estimate.create_bin_entries(),
        Some("Measured Efficiency per Bin"),
    );

    let true_total: u64 = estimate.true_counts.iter().sum();
    let approx_total: u64 = estimate.approx_counts.iter().sum();
    let summary = format!(
        "Summary\n{}\nBins: {}\nReconstructed samples in range: {}\n\
         Approximate samples in range: {}\nMean raw ratio (scale): {:.6}\n\
         Mean rescaled efficiency: {:.6}\nNon-finite bins: {}",
        "=".repeat(7),
        estimate.bin_count(),
        true_total,
        approx_total,
        estimate.scale,
        estimate.mean_value(),
        estimate.non_finite_bins()
    );

    let table_path = settings.output_dir.join(EFFICIENCY_TABLE_FILE);
    let output = format!(
        "Efficiency Analysis\n{}\n\n{}\n\n{}\n",
        "=".repeat(19),
        table,
        summary
    );
    fs::write(&table_path, output)?;

    let json_path = settings.output_dir.join(EFFICIENCY_JSON_FILE);
    let report = EfficiencyReport {
        bin_edges: edges.edges(),
        reference_domain: reference.domain(),
        reference_values: reference.values(),
        estimate,
    };
    serde_json::to_writer_pretty(BufWriter::new(File::create(&json_path)?), &report)?;

    Ok(vec![table_path, json_path])
}
