//! Step histograms of the sampled data
//!
//! Both charts bin over the same edges so the reconstructed union can be
//! compared bin-for-bin with the approximate samples.

use super::{Result, APPROX_PLOT_FILE, APPROX_SAMPLES_FILE, F_SAMPLES_FILE, G_SAMPLES_FILE, RECO_PLOT_FILE};
use crate::analysis::Histogram;
use crate::common::plots::{create_step_histogram_plot, PlotLabels};
use crate::parsing::load_samples;
use crate::settings::PlotSettings;
use log::debug;
use std::path::PathBuf;

/// Plots the `f` samples, the `g` samples and their union as step histograms
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - The path of `recoSamples.png`
/// * `Err(JobError)` - If loading or rendering failed
pub fn plot_reco(settings: &PlotSettings) -> Result<Vec<PathBuf>> {
    let edges = settings.bin_edges()?;
    let f_samples = load_samples(&settings.input_dir, F_SAMPLES_FILE)?;
    let g_samples = load_samples(&settings.input_dir, G_SAMPLES_FILE)?;

    let f_hist = Histogram::new(&f_samples, &edges);
    let g_hist = Histogram::new(&g_samples, &edges);
    let reco_hist = Histogram::from_sets(&[&f_samples, &g_samples], &edges);
    debug!(
        "Reco histograms: f={} g={} union={} samples in range",
        f_hist.total(),
        g_hist.total(),
        reco_hist.total()
    );

    let output_path = settings.output_dir.join(RECO_PLOT_FILE);
    create_step_histogram_plot(
        &[("f", &f_hist), ("g", &g_hist), ("f + g", &reco_hist)],
        &PlotLabels {
            title: "Reconstructed Samples",
            x_label: "x",
            y_label: "Count",
        },
        &output_path,
        settings.image_size(),
    )?;

    Ok(vec![output_path])
}

/// Plots the approximate samples against the reconstructed union
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - The path of `approxSamples.png`
/// * `Err(JobError)` - If loading or rendering failed
pub fn plot_approx(settings: &PlotSettings) -> Result<Vec<PathBuf>> {
    let edges = settings.bin_edges()?;
    let approx_samples = load_samples(&settings.input_dir, APPROX_SAMPLES_FILE)?;
    let f_samples = load_samples(&settings.input_dir, F_SAMPLES_FILE)?;
    let g_samples = load_samples(&settings.input_dir, G_SAMPLES_FILE)?;

    let approx_hist = Histogram::new(&approx_samples, &edges);
    let reco_hist = Histogram::from_sets(&[&f_samples, &g_samples], &edges);

    let output_path = settings.output_dir.join(APPROX_PLOT_FILE);
    create_step_histogram_plot(
        &[("approx", &approx_hist), ("reco", &reco_hist)],
        &PlotLabels {
            title: "Approximate Samples",
            x_label: "x",
            y_label: "Count",
        },
        &output_path,
        settings.image_size(),
    )?;

    Ok(vec![output_path])
}
