//! Fixed-range histogramming
//!
//! Counting follows numpy's `histogram`: every bin is half-open `[lo, hi)`
//! except the last, which also includes its upper edge. Samples outside the
//! edge range and NaN samples are not counted.

use thiserror::Error;

/// Errors that can occur when building bin edges
#[derive(Error, Debug, PartialEq)]
pub enum BinningError {
    #[error("At least 2 bin edges are required, got {0}")]
    TooFewEdges(usize),

    #[error("Bin range must be finite, got {low}..{high}")]
    NonFiniteRange { low: f64, high: f64 },

    #[error("Bin range is empty or reversed: {low}..{high}")]
    EmptyRange { low: f64, high: f64 },
}

type Result<T> = core::result::Result<T, BinningError>;

/// A strictly increasing sequence of bin edges.
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Creates `count` evenly spaced edges from `low` to `high` inclusive.
    ///
    /// The last edge is exactly `high`, as with `np.linspace`.
    pub fn linspace(low: f64, high: f64, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(BinningError::TooFewEdges(count));
        }

        // The span may overflow even when both bounds are finite.
        if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
            return Err(BinningError::NonFiniteRange { low, high });
        }

        if low >= high {
            return Err(BinningError::EmptyRange { low, high });
        }

        let step = (high - low) / (count - 1) as f64;
        let mut edges: Vec<f64> = (0..count - 1).map(|i| low + step * i as f64).collect();
        edges.push(high);

        Ok(Self { edges })
    }

    /// The edge values, lowest first.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (one less than the number of edges).
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn low(&self) -> f64 {
        self.edges[0]
    }

    pub fn high(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Midpoint of every bin.
    pub fn centres(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }

    /// Index of the bin containing `value`, if any.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let (low, high) = (self.low(), self.high());

        // Also rejects NaN.
        if !(value >= low && value <= high) {
            return None;
        }

        if value == high {
            return Some(self.bin_count() - 1);
        }

        Some(self.edges.partition_point(|&edge| edge <= value) - 1)
    }
}

/// Sample counts over a set of [`BinEdges`].
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: BinEdges,
    counts: Vec<u64>,
}

impl Histogram {
    /// Counts `samples` into the bins described by `edges`.
    pub fn new(samples: &[f64], edges: &BinEdges) -> Self {
        let mut counts = vec![0u64; edges.bin_count()];
        for &sample in samples {
            if let Some(index) = edges.bin_index(sample) {
                counts[index] += 1;
            }
        }

        Self {
            edges: edges.clone(),
            counts,
        }
    }

    /// Counts the concatenation of several sample sets.
    pub fn from_sets(sets: &[&[f64]], edges: &BinEdges) -> Self {
        let mut histogram = Self::new(&[], edges);
        for set in sets {
            for &sample in *set {
                if let Some(index) = edges.bin_index(sample) {
                    histogram.counts[index] += 1;
                }
            }
        }

        histogram
    }

    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total number of samples that landed inside the range.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest single bin count.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Outline of the histogram drawn as an unfilled step plot.
    ///
    /// Starts and ends on the baseline at the outer edges, then traces the
    /// top of every bin.
    pub fn step_outline(&self) -> Vec<(f64, f64)> {
        let edges = self.edges.edges();
        let mut outline = Vec::with_capacity(self.counts.len() * 2 + 2);

        outline.push((edges[0], 0.0));
        for (index, &count) in self.counts.iter().enumerate() {
            outline.push((edges[index], count as f64));
            outline.push((edges[index + 1], count as f64));
        }
        outline.push((edges[edges.len() - 1], 0.0));

        outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn linspace_matches_numpy_layout() {
        let edges = BinEdges::linspace(-2.0, 6.0, 50).unwrap();

        assert_eq!(edges.edges().len(), 50);
        assert_eq!(edges.bin_count(), 49);
        assert_eq!(edges.low(), -2.0);
        assert_eq!(edges.high(), 6.0);
        assert!((edges.edges()[1] - (-2.0 + 8.0 / 49.0)).abs() < 1e-12);
        assert!(edges.edges().windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[rstest(low, high, count, expected,
        case(0.0, 1.0, 1, BinningError::TooFewEdges(1)),
        case(0.0, 1.0, 0, BinningError::TooFewEdges(0)),
        case(1.0, 1.0, 5, BinningError::EmptyRange { low: 1.0, high: 1.0 }),
        case(2.0, 1.0, 5, BinningError::EmptyRange { low: 2.0, high: 1.0 }),
        case(0.0, f64::INFINITY, 5, BinningError::NonFiniteRange { low: 0.0, high: f64::INFINITY }),
        case(-1e308, 1e308, 50, BinningError::NonFiniteRange { low: -1e308, high: 1e308 })
    )]
    fn linspace_rejects_invalid_input(low: f64, high: f64, count: usize, expected: BinningError) {
        assert_eq!(BinEdges::linspace(low, high, count), Err(expected));
    }

    #[test]
    fn centres_are_bin_midpoints() {
        let edges = BinEdges::linspace(0.0, 4.0, 5).unwrap();
        assert_eq!(edges.centres(), vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[rstest(value, expected,
        case(0.0, Some(0)),     // Lower edge is inclusive
        case(0.999, Some(0)),
        case(1.0, Some(1)),     // Inner edges belong to the bin above
        case(3.5, Some(3)),
        case(4.0, Some(3)),     // Upper edge belongs to the last bin
        case(-0.001, None),
        case(4.001, None),
        case(f64::NAN, None),
        case(f64::INFINITY, None)
    )]
    fn bin_index_follows_numpy_rules(value: f64, expected: Option<usize>) {
        let edges = BinEdges::linspace(0.0, 4.0, 5).unwrap();
        assert_eq!(edges.bin_index(value), expected);
    }

    #[test]
    fn histogram_counts_samples_in_range() {
        let edges = BinEdges::linspace(0.0, 4.0, 5).unwrap();
        let samples = [0.0, 0.5, 1.0, 2.2, 2.7, 4.0, 5.0, -1.0, f64::NAN];
        let histogram = Histogram::new(&samples, &edges);

        assert_eq!(histogram.counts(), &[2, 1, 2, 1]);
        assert_eq!(histogram.total(), 6);
        assert_eq!(histogram.max_count(), 2);
    }

    #[test]
    fn histogram_of_concatenated_sets_matches_single_set() {
        let edges = BinEdges::linspace(-2.0, 6.0, 50).unwrap();
        let f = [-1.5, 0.0, 0.1, 2.0];
        let g = [3.0, 5.9, 6.0, 7.0];
        let joined: Vec<f64> = f.iter().chain(g.iter()).copied().collect();

        assert_eq!(
            Histogram::from_sets(&[&f, &g], &edges),
            Histogram::new(&joined, &edges)
        );
    }

    #[test]
    fn empty_samples_give_zero_counts() {
        let edges = BinEdges::linspace(0.0, 1.0, 3).unwrap();
        let histogram = Histogram::new(&[], &edges);

        assert_eq!(histogram.counts(), &[0, 0]);
        assert_eq!(histogram.max_count(), 0);
    }

    #[test]
    fn step_outline_traces_bin_tops() {
        let edges = BinEdges::linspace(0.0, 2.0, 3).unwrap();
        let histogram = Histogram::new(&[0.5, 1.5, 1.7], &edges);

        assert_eq!(
            histogram.step_outline(),
            vec![
                (0.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 2.0),
                (2.0, 2.0),
                (2.0, 0.0)
            ]
        );
    }
}
