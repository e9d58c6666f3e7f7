//! Plotting infrastructure for the diagnostic charts
//!
//! This module renders line charts, step histograms and error-bar comparisons
//! using the [`plotters`] crate. Charts are saved as PNG files through the
//! bitmap backend, which works in headless environments.
//!
//! Non-finite points are never drawn and lines break around them. A measured
//! point whose uncertainty is not finite is drawn without its error bar.

use crate::analysis::{EfficiencyEstimate, Histogram, PdfCurve};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Default colour cycle, in the order series are added.
const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

/// Fraction of the data span added on each side of an axis.
const AXIS_PADDING: f64 = 0.05;

/// Text shown around a chart
#[derive(Debug, Clone, Copy)]
pub struct PlotLabels<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// A line series with an optional legend entry
#[derive(Debug, Clone)]
pub struct LabelledSeries {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
}

impl LabelledSeries {
    pub fn new(label: Option<&str>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.map(str::to_string),
            points,
        }
    }
}

/// Splits `points` into runs of consecutive finite points.
///
/// Matches how matplotlib leaves gaps in a line at NaN values.
pub fn finite_segments(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for &(x, y) in points {
        if x.is_finite() && y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(core::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Finite `(min, max)` of `values`, or `None` when none are finite.
pub fn finite_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Axis range covering `min..max` with some padding.
///
/// A single-valued range is widened by half a unit on each side.
pub fn padded_range(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5)..(max + 0.5);
    }

    let padding = span * AXIS_PADDING;
    (min - padding)..(max + padding)
}

/// Creates a line chart with one or more series and saves it as a PNG file
///
/// # Arguments
/// * `series` - Lines to draw; each one gets the next colour of the cycle
/// * `labels` - Chart title and axis descriptions
/// * `output_path` - Path where the PNG file should be saved
/// * `size` - Image size in pixels
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If there is nothing finite to draw or rendering failed
pub fn create_line_plot(
    series: &[LabelledSeries],
    labels: &PlotLabels,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    if series.is_empty() {
        return Err(PlotError::InvalidData("No series to plot".to_string()));
    }

    let all_points = || series.iter().flat_map(|line| line.points.iter());
    let x_bounds = finite_bounds(all_points().filter(|(_, y)| y.is_finite()).map(|(x, _)| *x));
    let y_bounds = finite_bounds(all_points().filter(|(x, _)| x.is_finite()).map(|(_, y)| *y));

    let ((x_min, x_max), (y_min, y_max)) = match (x_bounds, y_bounds) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            return Err(PlotError::InvalidData(format!(
                "'{}' has no finite points",
                labels.title
            )))
        }
    };

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = build_chart(
        &root,
        labels,
        padded_range(x_min, x_max),
        padded_range(y_min, y_max),
    )?;

    for (index, line) in series.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        draw_line(&mut chart, &line.points, color, line.label.as_deref())?;
    }

    if series.iter().any(|line| line.label.is_some()) {
        draw_legend(&mut chart)?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Creates an unfilled step histogram chart and saves it as a PNG file
///
/// All histograms are expected to share the same edges; the X-axis spans the
/// edges of the first one.
///
/// # Arguments
/// * `histograms` - `(legend label, histogram)` pairs, drawn in order
/// * `labels` - Chart title and axis descriptions
/// * `output_path` - Path where the PNG file should be saved
/// * `size` - Image size in pixels
pub fn create_step_histogram_plot(
    histograms: &[(&str, &Histogram)],
    labels: &PlotLabels,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let Some((_, first)) = histograms.first() else {
        return Err(PlotError::InvalidData("No histograms to plot".to_string()));
    };

    let x_range = first.edges().low()..first.edges().high();
    let max_count = histograms
        .iter()
        .map(|(_, histogram)| histogram.max_count())
        .max()
        .unwrap_or(0);
    let y_max = if max_count == 0 {
        1.0
    } else {
        max_count as f64 * (1.0 + AXIS_PADDING)
    };

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = build_chart(&root, labels, x_range, 0.0..y_max)?;

    for (index, (label, histogram)) in histograms.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        draw_line(&mut chart, &histogram.step_outline(), color, Some(*label))?;
    }

    draw_legend(&mut chart)?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Creates the measured-vs-true efficiency chart and saves it as a PNG file
///
/// The reference curve is drawn as a black line labelled "true"; every finite
/// bin of the estimate is drawn as a red point with a vertical error bar
/// labelled "measured".
///
/// # Arguments
/// * `reference` - The known efficiency, already normalized to unit mean
/// * `estimate` - The binned measurement
/// * `labels` - Chart title and axis descriptions
/// * `output_path` - Path where the PNG file should be saved
/// * `size` - Image size in pixels
pub fn create_efficiency_plot(
    reference: &PdfCurve,
    estimate: &EfficiencyEstimate,
    labels: &PlotLabels,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let reference_points: Vec<(f64, f64)> = reference
        .points()
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    let measured = estimate.finite_points();

    let x_bounds = finite_bounds(
        reference_points
            .iter()
            .map(|(x, _)| *x)
            .chain(measured.iter().map(|(x, _, _)| *x)),
    );
    let y_bounds = finite_bounds(
        reference_points.iter().map(|(_, y)| *y).chain(
            measured.iter().flat_map(|&(_, y, error)| {
                let error = error.unwrap_or(0.0);
                [y - error, y + error]
            }),
        ),
    );

    let ((x_min, x_max), (y_min, y_max)) = match (x_bounds, y_bounds) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            return Err(PlotError::InvalidData(
                "Neither the reference curve nor the measurement has finite points".to_string(),
            ))
        }
    };

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = build_chart(
        &root,
        labels,
        padded_range(x_min, x_max),
        padded_range(y_min, y_max),
    )?;

    draw_line(&mut chart, &reference.points(), BLACK, Some("true"))?;

    chart
        .draw_series(measured.iter().filter_map(|&(x, y, error)| {
            error.map(|error| ErrorBar::new_vertical(x, y - error, y, y + error, RED.filled(), 8))
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            measured
                .iter()
                .map(|&(x, y, _)| Circle::new((x, y), 4, RED.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label("measured")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    draw_legend(&mut chart)?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

fn build_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    labels: &PlotLabels,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<Chart<'a, 'b>> {
    let mut chart = ChartBuilder::on(root)
        .caption(labels.title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(labels.x_label)
        .y_desc(labels.y_label)
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(chart)
}

/// Draws `points` as a line broken at non-finite points.
///
/// The legend entry, if any, is attached to the first segment only.
fn draw_line(
    chart: &mut Chart<'_, '_>,
    points: &[(f64, f64)],
    color: RGBColor,
    label: Option<&str>,
) -> Result<()> {
    for (index, segment) in finite_segments(points).into_iter().enumerate() {
        let annotation = chart
            .draw_series(LineSeries::new(segment, color.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        if let (0, Some(label)) = (index, label) {
            annotation
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
    }

    Ok(())
}

fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>) -> Result<()> {
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BinEdges;
    use rstest::rstest;

    const SIZE: (u32, u32) = (1200, 800);

    fn labels() -> PlotLabels<'static> {
        PlotLabels {
            title: "Test",
            x_label: "x",
            y_label: "y",
        }
    }

    #[test]
    fn test_finite_segments_split_at_nan() {
        let points = vec![
            (0.0, 1.0),
            (1.0, 2.0),
            (2.0, f64::NAN),
            (3.0, 4.0),
            (f64::INFINITY, 5.0),
            (5.0, 6.0),
            (6.0, 7.0),
        ];

        assert_eq!(
            finite_segments(&points),
            vec![
                vec![(0.0, 1.0), (1.0, 2.0)],
                vec![(3.0, 4.0)],
                vec![(5.0, 6.0), (6.0, 7.0)]
            ]
        );
    }

    #[test]
    fn test_finite_segments_all_nan() {
        assert!(finite_segments(&[(f64::NAN, 1.0), (0.0, f64::NAN)]).is_empty());
        assert!(finite_segments(&[]).is_empty());
    }

    #[test]
    fn test_finite_bounds() {
        assert_eq!(
            finite_bounds([3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]),
            Some((-1.0, 3.0))
        );
        assert_eq!(finite_bounds([f64::NAN]), None);
        assert_eq!(finite_bounds(Vec::<f64>::new()), None);
    }

    #[rstest(min, max, expected,
        case(0.0, 10.0, -0.5..10.5),
        case(-2.0, 6.0, -2.4..6.4),
        case(1.0, 1.0, 0.5..1.5)
    )]
    fn test_padded_range(min: f64, max: f64, expected: Range<f64>) {
        let range = padded_range(min, max);
        assert!((range.start - expected.start).abs() < 1e-12);
        assert!((range.end - expected.end).abs() < 1e-12);
    }

    #[test]
    fn test_plot_validation() {
        let output_path = std::env::temp_dir().join("efficiency_plots_validation.png");

        // No series at all
        let result = create_line_plot(&[], &labels(), &output_path, SIZE);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // Only non-finite points
        let series = [LabelledSeries::new(None, vec![(0.0, f64::NAN), (f64::NAN, 1.0)])];
        let result = create_line_plot(&series, &labels(), &output_path, SIZE);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // No histograms
        let result = create_step_histogram_plot(&[], &labels(), &output_path, SIZE);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // Nothing finite on the efficiency chart
        let reference = PdfCurve::new("efficiency", vec![0.0], vec![f64::NAN]).unwrap();
        let edges = BinEdges::linspace(0.0, 1.0, 2).unwrap();
        let empty: [f64; 0] = [];
        let estimate = EfficiencyEstimate::estimate(&[&empty[..]], &empty, &edges);
        let result = create_efficiency_plot(&reference, &estimate, &labels(), &output_path, SIZE);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        assert!(!output_path.exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_create_plots_success() {
        let temp_dir = tempfile::tempdir().unwrap();

        let line_path = temp_dir.path().join("line.png");
        let series = [LabelledSeries::new(
            Some("f"),
            vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0), (3.0, 2.0)],
        )];
        assert!(create_line_plot(&series, &labels(), &line_path, SIZE).is_ok());
        assert!(line_path.exists());

        let edges = BinEdges::linspace(-2.0, 6.0, 50).unwrap();
        let f = [-1.0, 0.0, 0.5, 2.0, 4.5];
        let g = [1.0, 3.0, 3.5, 5.5];
        let f_hist = Histogram::new(&f, &edges);
        let g_hist = Histogram::new(&g, &edges);
        let hist_path = temp_dir.path().join("hist.png");
        let result = create_step_histogram_plot(
            &[("f", &f_hist), ("g", &g_hist)],
            &labels(),
            &hist_path,
            SIZE,
        );
        assert!(result.is_ok());
        assert!(hist_path.exists());

        let reference = PdfCurve::new("efficiency", vec![-2.0, 2.0, 6.0], vec![0.5, 1.5, 1.0])
            .unwrap()
            .normalized_to_unit_mean();
        let estimate = EfficiencyEstimate::estimate(&[&f, &g], &[-1.0, 0.0, 1.0, 3.0], &edges);
        let efficiency_path = temp_dir.path().join("efficiency.png");
        let result =
            create_efficiency_plot(&reference, &estimate, &labels(), &efficiency_path, SIZE);
        assert!(result.is_ok());
        assert!(efficiency_path.exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_efficiency_plot_with_empty_reconstructed_bin() {
        let temp_dir = tempfile::tempdir().unwrap();
        let edges = BinEdges::linspace(0.0, 4.0, 5).unwrap();
        let estimate =
            EfficiencyEstimate::estimate(&[&[0.5, 1.5, 2.5]], &[0.5, 1.5, 2.5, 3.5], &edges);
        assert_eq!(estimate.finite_points()[3], (3.5, 0.0, None));

        let reference = PdfCurve::new("efficiency", vec![0.0, 4.0], vec![1.0, 1.0]).unwrap();
        let output_path = temp_dir.path().join("efficiency.png");
        let result = create_efficiency_plot(&reference, &estimate, &labels(), &output_path, SIZE);
        assert!(result.is_ok());
        assert!(output_path.exists());
    }
}
