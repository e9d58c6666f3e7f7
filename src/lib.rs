//! # Efficiency Plots
//! Diagnostic charts for a toy Monte-Carlo efficiency correction study.
//!
//! Reads the CSV arrays dumped by the generator and renders PDF curves,
//! sample histograms and a measured-vs-true efficiency comparison.

/// Run configuration shared by the driver and every plot job.
pub mod settings;

/// Loading of flat numeric CSV arrays.
pub mod parsing;

/// Numeric core: binning, PDF curves and the efficiency estimator.
pub mod analysis {
    pub mod binning;
    pub mod constants;
    pub mod efficiency;
    pub mod pdf_curve;
    pub mod stats;

    pub use binning::{BinEdges, BinningError, Histogram};
    pub use efficiency::{EfficiencyError, EfficiencyEstimate};
    pub use pdf_curve::{CurveError, PdfCurve};
}

/// Shared rendering and reporting infrastructure.
pub mod common {
    pub mod buckets;
    pub mod plots;

    pub use plots::PlotError;
}

/// The individual plotting routines.
pub mod jobs;

/// Fans the plotting routines out and collects their outcomes.
pub mod driver;
