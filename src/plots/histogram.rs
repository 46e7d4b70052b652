//! Histogram implementation with an optional kernel density overlay.

use batuta_common::display::WithDimensions;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::Panel;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::plots::Axes;
use crate::render::{draw_polyline, draw_rect_outline};
use crate::scale::{LinearScale, Scale};
use crate::stats::{linspace, GaussianKde, Summary};

/// Points along the density curve.
const KDE_GRID_POINTS: usize = 200;
/// Fraction of the data range added on each side of the x axis.
const X_MARGIN: f32 = 0.05;
/// Headroom above the tallest bar.
const Y_HEADROOM: f32 = 1.05;

/// Binning strategy for histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BinStrategy {
    /// Sturges' rule: ceil(log2(n) + 1)
    #[default]
    Sturges,
    /// Fixed number of bins
    Fixed(usize),
}

/// Bin edges and counts computed from the data.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f32>,
    /// Number of values per bin; the last bin is closed on the right.
    pub counts: Vec<usize>,
}

impl HistogramBins {
    /// Width of each (equal-width) bin.
    #[must_use]
    pub fn bin_width(&self) -> f32 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f32,
            _ => 0.0,
        }
    }

    /// Largest bin count.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Builder for creating histograms.
#[derive(Debug, Clone)]
pub struct Histogram {
    data: Vec<f32>,
    bin_strategy: BinStrategy,
    color: Rgba,
    width: u32,
    height: u32,
    density_overlay: bool,
    axes: Axes,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create a new histogram builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            bin_strategy: BinStrategy::default(),
            color: Rgba::SERIES_BLUE,
            width: 800,
            height: 600,
            density_overlay: false,
            axes: Axes::new(),
        }
    }

    /// Set the data. Non-finite values are ignored.
    #[must_use]
    pub fn data(mut self, data: &[f32]) -> Self {
        self.data = data.iter().copied().filter(|v| v.is_finite()).collect();
        self
    }

    /// Set the binning strategy.
    #[must_use]
    pub fn bins(mut self, strategy: BinStrategy) -> Self {
        self.bin_strategy = strategy;
        self
    }

    /// Set the bar and curve color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Overlay a Gaussian kernel density estimate scaled to bin counts.
    #[must_use]
    pub fn density_overlay(mut self, enabled: bool) -> Self {
        self.density_overlay = enabled;
        self
    }

    /// Set the title and axis labels.
    #[must_use]
    pub fn axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    /// Number of bins the strategy yields for the current data.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        let n = self.data.len();
        if n == 0 {
            return 1;
        }

        match self.bin_strategy {
            BinStrategy::Sturges => ((n as f32).log2().ceil() + 1.0) as usize,
            BinStrategy::Fixed(bins) => bins,
        }
        .max(1)
    }

    /// Build and validate the histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no finite data.
    pub fn build(self) -> Result<Self> {
        if self.data.is_empty() {
            return Err(Error::EmptyData);
        }
        Ok(self)
    }

    /// Compute bin edges and counts.
    ///
    /// Data with zero range is binned over `value +/- 0.5`.
    #[must_use]
    pub fn compute_bins(&self) -> HistogramBins {
        let bin_count = self.bin_count();
        let (min, max) = match Summary::of(&self.data) {
            Some(s) if s.range() > 0.0 => (s.min, s.max),
            Some(s) => (s.min - 0.5, s.max + 0.5),
            None => (0.0, 1.0),
        };
        let bin_width = (max - min) / bin_count as f32;

        let mut counts = vec![0usize; bin_count];
        for &value in &self.data {
            let bin = ((value - min) / bin_width).floor() as usize;
            counts[bin.min(bin_count - 1)] += 1;
        }

        let edges = (0..=bin_count).map(|i| min + i as f32 * bin_width).collect();
        HistogramBins { edges, counts }
    }

    /// Density curve in data coordinates (x, expected count per bin).
    ///
    /// Empty when the overlay is disabled or the density is undefined.
    #[must_use]
    pub fn density_curve(&self, bins: &HistogramBins) -> Vec<(f32, f32)> {
        if !self.density_overlay {
            return Vec::new();
        }
        let Some(kde) = GaussianKde::fit(&self.data) else {
            return Vec::new();
        };
        let (Some(&lo), Some(&hi)) = (bins.edges.first(), bins.edges.last()) else {
            return Vec::new();
        };

        let to_counts = self.data.len() as f64 * f64::from(bins.bin_width());
        let grid = linspace(f64::from(lo), f64::from(hi), KDE_GRID_POINTS);
        let density = kde.evaluate(&grid);
        grid.iter()
            .zip(density)
            .map(|(&x, d)| (x as f32, (d * to_counts) as f32))
            .collect()
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or too small for the axes.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        self.render(&mut fb)?;
        Ok(fb)
    }

    /// Render onto an existing framebuffer of this histogram's dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot area is empty.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let area = self.axes.plot_area(self.width.min(fb.width()), self.height.min(fb.height()));
        if area.is_empty() {
            return Err(Error::Rendering("Plot area too small".into()));
        }

        let bins = self.compute_bins();
        let curve = self.density_curve(&bins);

        let lo = bins.edges[0];
        let hi = bins.edges[bins.edges.len() - 1];
        let pad = (hi - lo) * X_MARGIN;
        let x_scale = LinearScale::new((lo - pad, hi + pad), (area.x as f32, area.right() as f32))?;

        let curve_max = curve.iter().map(|&(_, y)| y).fold(0.0f32, f32::max);
        let y_max = (bins.max_count() as f32).max(curve_max).max(1.0) * Y_HEADROOM;
        let y_scale = LinearScale::new((0.0, y_max), (area.bottom() as f32, area.y as f32))?;

        let fill = Rgba::WHITE.lerp(self.color, 0.75);
        let edge = Rgba::WHITE.lerp(self.color, 0.9);
        for (i, &count) in bins.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let left = x_scale.scale(bins.edges[i]).round() as u32;
            let right = (x_scale.scale(bins.edges[i + 1]).round() as u32).max(left + 1);
            let top = y_scale.scale(count as f32).round() as u32;
            let bar = Rect::new(left, top, right - left, area.bottom().saturating_sub(top));
            if bar.is_empty() {
                continue;
            }
            fb.fill_rect(bar.x, bar.y, bar.width, bar.height, fill);
            draw_rect_outline(fb, bar, edge, 1);
        }

        if curve.len() > 1 {
            let points: Vec<Point> = curve
                .iter()
                .map(|&(x, y)| Point::new(x_scale.scale(x), y_scale.scale(y)))
                .collect();
            draw_polyline(fb, &points, self.color, 2);
        }

        self.axes.draw(fb, area, Some(&x_scale), &y_scale);
        Ok(())
    }
}

impl WithDimensions for Histogram {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Panel for Histogram {
    fn resize(&mut self, width: u32, height: u32) {
        self.set_dimensions(width, height);
    }

    fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        Histogram::render(self, fb)
    }
}
