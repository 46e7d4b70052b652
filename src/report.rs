//! Exploratory report figures.
//!
//! Three fixed chart sets are rendered from a [`Dataset`]: a grid of
//! histograms with density overlays, a grid of box plots and an annotated
//! correlation heatmap. [`visualize_with`] writes all three as PNG files
//! into the configured output directory.

use std::fs;
use std::path::{Path, PathBuf};

use batuta_common::display::WithDimensions;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::figure::Figure;
use crate::plots::{Axes, BinStrategy, BoxPlot, Heatmap, Histogram};
use crate::stats::CorrelationMatrix;

/// File name of the histogram grid.
pub const DISTRIBUTIONS_FILE: &str = "distributions.png";
/// File name of the box plot grid.
pub const BOXPLOTS_FILE: &str = "boxplots.png";
/// File name of the correlation heatmap.
pub const CORRELATIONS_FILE: &str = "correlations.png";

/// Output directory relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "reports/figures";

/// Histogram panels as (column, label), row-major in a 3x3 grid.
///
/// `length_diff` appears twice; the second panel carries the long label.
pub const DISTRIBUTION_PANELS: [(&str, &str); 7] = [
    ("length_diff", "Length difference"),
    ("similarity", "Similarity"),
    ("reference_length", "Reference length"),
    ("translation_length", "Translation length"),
    ("length_diff", "Difference in translation and reference lengths"),
    ("ref_tox", "Reference toxicity"),
    ("trn_tox", "Translation toxicity"),
];

/// Box plot panels as (column, title), row-major in a 2x2 grid.
pub const BOXPLOT_PANELS: [(&str, &str); 4] = [
    ("similarity", "Similarity"),
    ("length_diff", "Length Difference"),
    ("ref_tox", "Reference Toxicity"),
    ("trn_tox", "Translation Toxicity"),
];

/// Columns of the correlation matrix, in display order.
pub const CORRELATION_COLUMNS: [&str; 4] = ["similarity", "length_diff", "ref_tox", "trn_tox"];

/// Bins per distribution histogram.
pub const HISTOGRAM_BINS: usize = 40;

const DISTRIBUTIONS_SIZE: (u32, u32) = (2000, 1000);
const BOXPLOTS_SIZE: (u32, u32) = (600, 600);
const CORRELATIONS_SIZE: (u32, u32) = (600, 400);

/// Where the report goes and how large each figure is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    output_dir: PathBuf,
    distributions_size: (u32, u32),
    boxplots_size: (u32, u32),
    correlations_size: (u32, u32),
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            distributions_size: DISTRIBUTIONS_SIZE,
            boxplots_size: BOXPLOTS_SIZE,
            correlations_size: CORRELATIONS_SIZE,
        }
    }
}

impl ReportConfig {
    /// Default configuration writing to `root/reports/figures`.
    #[must_use]
    pub fn with_root(root: &Path) -> Self {
        Self {
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            ..Self::default()
        }
    }

    /// Write figures into `dir` instead.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Pixel size of the histogram grid.
    #[must_use]
    pub fn distributions_size(mut self, width: u32, height: u32) -> Self {
        self.distributions_size = (width, height);
        self
    }

    /// Pixel size of the box plot grid.
    #[must_use]
    pub fn boxplots_size(mut self, width: u32, height: u32) -> Self {
        self.boxplots_size = (width, height);
        self
    }

    /// Pixel size of the correlation heatmap.
    #[must_use]
    pub fn correlations_size(mut self, width: u32, height: u32) -> Self {
        self.correlations_size = (width, height);
        self
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output file paths.
    #[must_use]
    pub fn paths(&self) -> ReportPaths {
        ReportPaths {
            distributions: self.output_dir.join(DISTRIBUTIONS_FILE),
            boxplots: self.output_dir.join(BOXPLOTS_FILE),
            correlations: self.output_dir.join(CORRELATIONS_FILE),
        }
    }
}

/// Paths of the written figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Histogram grid.
    pub distributions: PathBuf,
    /// Box plot grid.
    pub boxplots: PathBuf,
    /// Correlation heatmap.
    pub correlations: PathBuf,
}

impl ReportPaths {
    /// Paths in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.distributions, &self.boxplots, &self.correlations]
            .into_iter()
            .map(PathBuf::as_path)
    }
}

/// Histogram grid with a density overlay per panel.
///
/// # Errors
///
/// Returns an error if a column is missing or has no finite values.
pub fn distributions_figure(dataset: &Dataset, (width, height): (u32, u32)) -> Result<Figure> {
    let mut figure = Figure::new(width, height).grid(3, 3);
    for (column, label) in DISTRIBUTION_PANELS {
        let axes = Axes::new()
            .title(&format!("{label} distribution"))
            .xlabel(label)
            .ylabel("Frequency")
            .text_scale(2);
        let histogram = Histogram::new()
            .data(dataset.column(column)?)
            .bins(BinStrategy::Fixed(HISTOGRAM_BINS))
            .density_overlay(true)
            .axes(axes)
            .build()?;
        figure = figure.add_panel(histogram);
    }
    Ok(figure)
}

/// Box plot grid, one column per panel.
///
/// # Errors
///
/// Returns an error if a column is missing or has no finite values.
pub fn boxplots_figure(dataset: &Dataset, (width, height): (u32, u32)) -> Result<Figure> {
    let mut figure = Figure::new(width, height).grid(2, 2);
    for (column, title) in BOXPLOT_PANELS {
        let plot = BoxPlot::new()
            .add_group(dataset.column(column)?, column)
            .axes(Axes::new().title(title).ylabel("Values"))
            .build()?;
        figure = figure.add_panel(plot);
    }
    Ok(figure)
}

/// Annotated Pearson correlation heatmap.
///
/// # Errors
///
/// Returns an error if a column is missing.
pub fn correlations_figure(dataset: &Dataset, (width, height): (u32, u32)) -> Result<Figure> {
    let columns = CORRELATION_COLUMNS
        .iter()
        .map(|&name| Ok((name, dataset.column(name)?)))
        .collect::<Result<Vec<_>>>()?;
    let matrix = CorrelationMatrix::pearson(&columns)?;

    let heatmap = Heatmap::new()
        .data(&matrix.to_f32(), matrix.size(), matrix.size())
        .row_labels(&CORRELATION_COLUMNS)
        .col_labels(&CORRELATION_COLUMNS)
        .annotate(2)
        .colorbar(true)
        .axes(Axes::new().title("Correlation Matrix"))
        .dimensions(width, height)
        .build()?;
    Ok(Figure::new(width, height).add_panel(heatmap))
}

/// Render the histogram grid to `path`.
///
/// # Errors
///
/// Returns an error if a column is missing, rendering fails or the file
/// cannot be written. Nothing is written on failure.
pub fn plot_distributions(dataset: &Dataset, path: &Path) -> Result<()> {
    save_distributions(dataset, DISTRIBUTIONS_SIZE, path)
}

/// Render the box plot grid to `path`.
///
/// # Errors
///
/// Returns an error if a column is missing, rendering fails or the file
/// cannot be written. Nothing is written on failure.
pub fn plot_boxplots(dataset: &Dataset, path: &Path) -> Result<()> {
    save_boxplots(dataset, BOXPLOTS_SIZE, path)
}

/// Render the correlation heatmap to `path`.
///
/// # Errors
///
/// Returns an error if a column is missing, rendering fails or the file
/// cannot be written. Nothing is written on failure.
pub fn plot_correlations(dataset: &Dataset, path: &Path) -> Result<()> {
    save_correlations(dataset, CORRELATIONS_SIZE, path)
}

fn save_distributions(dataset: &Dataset, size: (u32, u32), path: &Path) -> Result<()> {
    log::info!("Generating distributions");
    distributions_figure(dataset, size)?.save(path)
}

fn save_boxplots(dataset: &Dataset, size: (u32, u32), path: &Path) -> Result<()> {
    log::info!("Generating boxplots");
    boxplots_figure(dataset, size)?.save(path)
}

fn save_correlations(dataset: &Dataset, size: (u32, u32), path: &Path) -> Result<()> {
    log::info!("Generating correlation matrix");
    correlations_figure(dataset, size)?.save(path)
}

/// Write all three figures under `./reports/figures`.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable or any figure
/// fails; see [`visualize_with`].
pub fn visualize(dataset: &Dataset) -> Result<ReportPaths> {
    let root = std::env::current_dir()?;
    visualize_with(dataset, &ReportConfig::with_root(&root))
}

/// Write all three figures as configured, creating the output directory.
///
/// Existing files are overwritten. Figures are rendered in order and the
/// first failure stops the run.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, a required column is
/// missing, or a figure cannot be rendered or written.
pub fn visualize_with(dataset: &Dataset, config: &ReportConfig) -> Result<ReportPaths> {
    fs::create_dir_all(config.dir())?;
    log::debug!("writing report figures to {}", config.dir().display());
    let paths = config.paths();

    save_distributions(dataset, config.distributions_size, &paths.distributions)?;
    save_boxplots(dataset, config.boxplots_size, &paths.boxplots)?;
    save_correlations(dataset, config.correlations_size, &paths.correlations)?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample(rows: usize) -> Dataset {
        let wave = |scale: f32, offset: usize| -> Vec<f32> {
            (0..rows).map(|i| ((i + offset) as f32 * 0.37).sin() * scale).collect()
        };
        Dataset::new()
            .with_column("length_diff", wave(0.3, 0))
            .and_then(|d| d.with_column("similarity", wave(0.5, 3)))
            .and_then(|d| d.with_column("reference_length", wave(40.0, 5)))
            .and_then(|d| d.with_column("translation_length", wave(30.0, 7)))
            .and_then(|d| d.with_column("ref_tox", wave(1.0, 11)))
            .and_then(|d| d.with_column("trn_tox", wave(1.0, 13)))
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.dir(), Path::new("reports/figures"));

        let rooted = ReportConfig::with_root(Path::new("/tmp/project"));
        let paths = rooted.paths();
        assert_eq!(paths.boxplots, Path::new("/tmp/project/reports/figures/boxplots.png"));
    }

    #[test]
    fn test_paths_in_order() {
        let paths = ReportConfig::default().output_dir("out").paths();
        let names: Vec<_> = paths.iter().filter_map(|p| p.file_name()?.to_str()).collect();
        assert_eq!(names, vec![DISTRIBUTIONS_FILE, BOXPLOTS_FILE, CORRELATIONS_FILE]);
    }

    #[test]
    fn test_distribution_panels_fill_grid() {
        let mut figure = distributions_figure(&sample(64), (900, 450)).unwrap();
        assert_eq!(figure.panel_count(), 7);
        assert_eq!(figure.cell_count(), 9);
        let fb = figure.render().unwrap();
        assert_eq!((fb.width(), fb.height()), (900, 450));
    }

    #[test]
    fn test_boxplot_panels() {
        let figure = boxplots_figure(&sample(16), BOXPLOTS_SIZE).unwrap();
        assert_eq!(figure.panel_count(), 4);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let dataset = Dataset::new().with_column("similarity", vec![0.1, 0.2]).unwrap();
        match correlations_figure(&dataset, CORRELATIONS_SIZE) {
            Err(Error::MissingColumn { name }) => assert_eq!(name, "length_diff"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(boxplots_figure(&dataset, BOXPLOTS_SIZE).is_err());
    }

    #[test]
    fn test_custom_sizes() {
        let config = ReportConfig::default()
            .distributions_size(800, 400)
            .boxplots_size(400, 400)
            .correlations_size(500, 300);
        assert_eq!(config.distributions_size, (800, 400));
        assert_eq!(config.correlations_size, (500, 300));
    }
}
