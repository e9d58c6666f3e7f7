//! Line plots of the analytically known curves

use super::Result;
use crate::common::plots::{create_line_plot, LabelledSeries, PlotLabels};
use crate::parsing::load_pdf_curve;
use crate::settings::PlotSettings;
use std::path::PathBuf;

/// Name of the chart written for curve `name`
pub fn pdf_plot_file_name(name: &str) -> String {
    format!("{}.png", name)
}

/// Plots the curve stored in `domain_<name>.csv` and `vals_<name>.csv`
///
/// # Arguments
/// * `name` - Curve name, also used as the chart title
/// * `settings` - Input/output directories and image size
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - The path of `<name>.png`
/// * `Err(JobError)` - If loading or rendering failed
pub fn plot_pdf(name: &str, settings: &PlotSettings) -> Result<Vec<PathBuf>> {
    let curve = load_pdf_curve(&settings.input_dir, name)?;
    let output_path = settings.output_dir.join(pdf_plot_file_name(name));

    create_line_plot(
        &[LabelledSeries::new(None, curve.points())],
        &PlotLabels {
            title: name,
            x_label: "x",
            y_label: name,
        },
        &output_path,
        settings.image_size(),
    )?;

    Ok(vec![output_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn plot_file_is_named_after_curve() {
        assert_eq!(pdf_plot_file_name("efficiency"), "efficiency.png");
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn plots_curve_from_file_pair() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("domain_f.csv"), "-2,0,2,4,6").unwrap();
        fs::write(dir.path().join("vals_f.csv"), "0.3,0.9,0.7,0.2,0.1").unwrap();

        let settings = PlotSettings {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
            ..PlotSettings::new()
        };

        let outputs = plot_pdf("f", &settings).unwrap();
        assert_eq!(outputs, vec![dir.path().join("f.png")]);
        assert!(outputs[0].exists());
    }
}
