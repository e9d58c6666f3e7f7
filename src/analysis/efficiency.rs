//! Binned efficiency estimation
//!
//! The efficiency is measured as the per-bin ratio of reconstructed ("true")
//! counts to counts drawn from the approximate generating PDF. Each ratio
//! carries the counting uncertainty of two independent Poisson counts,
//!
//! ```text
//! err = ratio * sqrt(1 / n_true + 1 / n_approx)
//! ```
//!
//! and both are divided by the mean ratio so the result can be laid over a
//! reference curve normalized to unit mean.
//!
//! Empty bins are not special-cased: a bin with no approximate samples gives
//! an infinite or NaN ratio, and a single non-finite ratio makes the mean
//! (and with it every rescaled value) non-finite. Callers can detect this via
//! [`EfficiencyEstimate::non_finite_bins`].

use super::binning::{BinEdges, Histogram};
use super::stats::{count_non_finite, mean};
use crate::common::buckets::BinEntry;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during efficiency estimation
#[derive(Error, Debug, PartialEq)]
pub enum EfficiencyError {
    #[error("Histograms must share bin edges ({true_bins} true bins vs {approx_bins} approximate bins)")]
    MismatchedBins {
        true_bins: usize,
        approx_bins: usize,
    },
}

/// Per-bin efficiency measurement, rescaled to unit mean.
#[derive(Debug, Clone, Serialize)]
pub struct EfficiencyEstimate {
    /// Bin centres
    pub centres: Vec<f64>,
    /// Reconstructed sample counts per bin
    pub true_counts: Vec<u64>,
    /// Approximate sample counts per bin
    pub approx_counts: Vec<u64>,
    /// Rescaled efficiency per bin
    pub values: Vec<f64>,
    /// Rescaled uncertainty per bin
    pub errors: Vec<f64>,
    /// Mean of the raw ratios, which both `values` and `errors` were divided by
    pub scale: f64,
}

impl EfficiencyEstimate {
    /// Histograms both sample collections over `edges` and estimates the efficiency.
    ///
    /// The reconstructed sample is the concatenation of `true_sets`.
    pub fn estimate(true_sets: &[&[f64]], approx_samples: &[f64], edges: &BinEdges) -> Self {
        let true_hist = Histogram::from_sets(true_sets, edges);
        let approx_hist = Histogram::new(approx_samples, edges);

        Self::from_matching_histograms(&true_hist, &approx_hist)
    }

    /// Estimates the efficiency from two histograms with identical edges.
    pub fn from_histograms(
        true_hist: &Histogram,
        approx_hist: &Histogram,
    ) -> Result<Self, EfficiencyError> {
        if true_hist.edges() != approx_hist.edges() {
            return Err(EfficiencyError::MismatchedBins {
                true_bins: true_hist.edges().bin_count(),
                approx_bins: approx_hist.edges().bin_count(),
            });
        }

        Ok(Self::from_matching_histograms(true_hist, approx_hist))
    }

    fn from_matching_histograms(true_hist: &Histogram, approx_hist: &Histogram) -> Self {
        let (ratios, raw_errors): (Vec<f64>, Vec<f64>) = true_hist
            .counts()
            .iter()
            .zip(approx_hist.counts())
            .map(|(&true_count, &approx_count)| {
                let true_count = true_count as f64;
                let approx_count = approx_count as f64;

                let ratio = true_count / approx_count;
                let error = ratio * (1.0 / true_count + 1.0 / approx_count).sqrt();
                (ratio, error)
            })
            .unzip();

        let scale = mean(&ratios);

        Self {
            centres: true_hist.edges().centres(),
            true_counts: true_hist.counts().to_vec(),
            approx_counts: approx_hist.counts().to_vec(),
            values: ratios.iter().map(|ratio| ratio / scale).collect(),
            errors: raw_errors.iter().map(|error| error / scale).collect(),
            scale,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.values.len()
    }

    /// Mean of the rescaled values; 1 whenever every ratio is finite.
    pub fn mean_value(&self) -> f64 {
        mean(&self.values)
    }

    /// Number of bins whose rescaled value is NaN or infinite.
    pub fn non_finite_bins(&self) -> usize {
        count_non_finite(&self.values)
    }

    /// `(centre, value, error)` for every bin with a finite value.
    ///
    /// The error is `None` when it is not finite, as in a bin with no
    /// reconstructed samples, where the value is 0 but the error is NaN.
    pub fn finite_points(&self) -> Vec<(f64, f64, Option<f64>)> {
        self.centres
            .iter()
            .zip(&self.values)
            .zip(&self.errors)
            .filter(|((_, value), _)| value.is_finite())
            .map(|((&centre, &value), &error)| (centre, value, error.is_finite().then_some(error)))
            .collect()
    }

    /// Table rows for the text report, one per bin.
    pub fn create_bin_entries(&self) -> Vec<BinEntry> {
        (0..self.bin_count())
            .map(|index| {
                BinEntry::new(
                    self.centres[index],
                    self.true_counts[index],
                    self.approx_counts[index],
                    self.values[index],
                    self.errors[index],
                )
            })
            .collect()
    }
}
