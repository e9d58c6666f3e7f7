use crate::analysis::constants::*;
use crate::analysis::{BinEdges, BinningError};
use log::warn;
use std::path::PathBuf;

/// Controls where the plot jobs read from and write to, and how they bin.
///
/// # Remarks
///
/// The defaults reproduce the generator's layout: every input is read from,
/// and every chart written to, the working directory, with 49 bins over
/// `[-2, 6]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    /// Directory containing the generator's CSV files.
    pub input_dir: PathBuf,

    /// Directory where charts and reports are written.
    pub output_dir: PathBuf,

    /// Lower edge of the histogram range.
    ///
    /// Must be finite and smaller than [`Self::hist_high`].
    pub hist_low: f64,

    /// Upper edge of the histogram range.
    pub hist_high: f64,

    /// Number of histogram edges.\
    /// Range is [`MIN_EDGE_COUNT`] to [`MAX_EDGE_COUNT`].
    pub edge_count: usize,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,
}

impl PlotSettings {
    /// Creates a new `PlotSettings` with default values.
    pub fn new() -> Self {
        PlotSettings {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            hist_low: HIST_LOW,
            hist_high: HIST_HIGH,
            edge_count: HIST_EDGE_COUNT,
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
        }
    }

    /// Sanitizes settings to acceptable values if they are out of range or undefined.
    pub fn sanitize(&mut self) {
        let span = self.hist_high - self.hist_low;
        if !span.is_finite() || !self.hist_low.is_finite() || self.hist_low >= self.hist_high {
            warn!(
                "Invalid histogram range {}..{}, using {}..{}",
                self.hist_low, self.hist_high, HIST_LOW, HIST_HIGH
            );
            self.hist_low = HIST_LOW;
            self.hist_high = HIST_HIGH;
        }

        self.edge_count = self.edge_count.clamp(MIN_EDGE_COUNT, MAX_EDGE_COUNT);
        self.width = self.width.clamp(MIN_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION);
        self.height = self.height.clamp(MIN_IMAGE_DIMENSION, MAX_IMAGE_DIMENSION);
    }

    /// The histogram edges shared by every sample plot.
    pub fn bin_edges(&self) -> Result<BinEdges, BinningError> {
        BinEdges::linspace(self.hist_low, self.hist_high, self.edge_count)
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self::new()
    }
}
