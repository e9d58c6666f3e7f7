//! Fixed constants of the efficiency study
//!
//! The generator samples every distribution over the same domain, so the
//! histogram range and the reference curves share these bounds.

/// Lower edge of the histogram range
pub const HIST_LOW: f64 = -2.0;

/// Upper edge of the histogram range
pub const HIST_HIGH: f64 = 6.0;

/// Number of bin edges (the number of bins is one less)
pub const HIST_EDGE_COUNT: usize = 50;

/// Smallest number of edges accepted after sanitizing (one bin)
pub const MIN_EDGE_COUNT: usize = 2;

/// Largest number of edges accepted after sanitizing
pub const MAX_EDGE_COUNT: usize = 10_000;

/// Default output image width in pixels
pub const IMAGE_WIDTH: u32 = 1200;

/// Default output image height in pixels
pub const IMAGE_HEIGHT: u32 = 800;

/// Smallest accepted image dimension
pub const MIN_IMAGE_DIMENSION: u32 = 200;

/// Largest accepted image dimension
pub const MAX_IMAGE_DIMENSION: u32 = 8000;

/// Names of the analytically known curves dumped by the generator
pub const PDF_NAMES: [&str; 4] = ["f", "g", "efficiency", "approx"];

/// Name of the reference curve used by the efficiency comparison
pub const EFFICIENCY_CURVE: &str = "efficiency";
