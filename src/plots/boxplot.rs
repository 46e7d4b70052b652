//! Box plot implementation.
//!
//! Box plots display the distribution of data through quartiles, with
//! whiskers at the most extreme values within 1.5 IQR and open-circle fliers
//! beyond them.

use batuta_common::display::WithDimensions;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::Panel;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::plots::Axes;
use crate::render::{draw_circle_outline, draw_line, draw_rect_outline};
use crate::scale::{LinearScale, Scale};

/// Whisker reach in interquartile ranges.
const WHISKER_IQR: f32 = 1.5;
/// Flier marker radius in pixels.
const FLIER_RADIUS: i32 = 3;

/// Statistics computed for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Lower whisker end: smallest value within the lower fence
    pub min: f32,
    /// First quartile (25th percentile)
    pub q1: f32,
    /// Median (50th percentile)
    pub median: f32,
    /// Third quartile (75th percentile)
    pub q3: f32,
    /// Upper whisker end: largest value within the upper fence
    pub max: f32,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f32,
    /// Values beyond the whiskers
    pub outliers: Vec<f32>,
}

impl BoxStats {
    /// Compute box plot statistics from the finite values of `data`.
    ///
    /// Returns `None` if there are no finite values.
    #[must_use]
    pub fn from_data(data: &[f32]) -> Option<Self> {
        let mut sorted: Vec<f32> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f32::total_cmp);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_fence = q1 - WHISKER_IQR * iqr;
        let upper_fence = q3 + WHISKER_IQR * iqr;

        let min = sorted.iter().copied().find(|&x| x >= lower_fence).unwrap_or(q1);
        let max = sorted.iter().rev().copied().find(|&x| x <= upper_fence).unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < lower_fence || x > upper_fence)
            .collect();

        Some(Self { min, q1, median, q3, max, iqr, outliers })
    }

    /// Smallest and largest value drawn, fliers included.
    #[must_use]
    pub fn extent(&self) -> (f32, f32) {
        self.outliers
            .iter()
            .fold((self.min, self.max), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// Percentile of sorted data with linear interpolation between ranks.
fn percentile(sorted: &[f32], p: f32) -> f32 {
    match sorted.len() {
        0 => return 0.0,
        1 => return sorted[0],
        _ => {}
    }

    let k = (p / 100.0) * (sorted.len() - 1) as f32;
    let f = k.floor() as usize;
    let c = (k.ceil() as usize).min(sorted.len() - 1);
    if f == c {
        sorted[f]
    } else {
        let d = k - f as f32;
        sorted[f] * (1.0 - d) + sorted[c] * d
    }
}

/// Box plot builder.
#[derive(Debug, Clone)]
pub struct BoxPlot {
    groups: Vec<Vec<f32>>,
    labels: Vec<String>,
    outline_color: Rgba,
    median_color: Rgba,
    flier_color: Rgba,
    width: u32,
    height: u32,
    box_width: f32,
    axes: Axes,
}

impl Default for BoxPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxPlot {
    /// Create a new box plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            labels: Vec::new(),
            outline_color: Rgba::SERIES_BLUE,
            median_color: Rgba::SERIES_ORANGE,
            flier_color: Rgba::AXIS_GREY,
            width: 600,
            height: 400,
            box_width: 0.5,
            axes: Axes::new(),
        }
    }

    /// Add a data group.
    #[must_use]
    pub fn add_group(mut self, data: &[f32], label: &str) -> Self {
        // Keep labels aligned with groups added without one
        while self.labels.len() < self.groups.len() {
            self.labels.push((self.labels.len() + 1).to_string());
        }
        self.groups.push(data.to_vec());
        self.labels.push(label.to_string());
        self
    }

    /// Set multiple data groups at once.
    #[must_use]
    pub fn data(mut self, groups: Vec<Vec<f32>>) -> Self {
        self.groups = groups;
        self
    }

    /// Set group labels.
    #[must_use]
    pub fn labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set box and whisker color.
    #[must_use]
    pub fn outline_color(mut self, color: Rgba) -> Self {
        self.outline_color = color;
        self
    }

    /// Set median line color.
    #[must_use]
    pub fn median_color(mut self, color: Rgba) -> Self {
        self.median_color = color;
        self
    }

    /// Set box width as a fraction of each group's slot.
    #[must_use]
    pub fn box_width(mut self, width: f32) -> Self {
        self.box_width = width.clamp(0.1, 1.0);
        self
    }

    /// Set the title and axis labels.
    #[must_use]
    pub fn axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    /// Build the box plot.
    ///
    /// Groups without finite values are dropped along with their labels;
    /// groups without a label are numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns an error if no group has finite data.
    pub fn build(self) -> Result<BuiltBoxPlot> {
        let mut stats = Vec::with_capacity(self.groups.len());
        let mut labels = Vec::with_capacity(self.groups.len());
        for (i, group) in self.groups.iter().enumerate() {
            if let Some(s) = BoxStats::from_data(group) {
                stats.push(s);
                labels.push(self.labels.get(i).cloned().unwrap_or_else(|| (i + 1).to_string()));
            }
        }

        if stats.is_empty() {
            return Err(Error::EmptyData);
        }

        Ok(BuiltBoxPlot {
            stats,
            labels,
            outline_color: self.outline_color,
            median_color: self.median_color,
            flier_color: self.flier_color,
            width: self.width,
            height: self.height,
            box_width: self.box_width,
            axes: self.axes,
        })
    }
}

/// A built box plot ready for rendering.
#[derive(Debug, Clone)]
pub struct BuiltBoxPlot {
    stats: Vec<BoxStats>,
    labels: Vec<String>,
    outline_color: Rgba,
    median_color: Rgba,
    flier_color: Rgba,
    width: u32,
    height: u32,
    box_width: f32,
    axes: Axes,
}

impl BuiltBoxPlot {
    /// Get number of groups.
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.stats.len()
    }

    /// Get statistics for a group.
    #[must_use]
    pub fn stats(&self, index: usize) -> Option<&BoxStats> {
        self.stats.get(index)
    }

    /// Get group labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Value range covered by the y axis, padded by 10% (or 0.5 for flat data).
    #[must_use]
    pub fn value_domain(&self) -> (f32, f32) {
        let (lo, hi) = self.stats.iter().fold((f32::MAX, f32::MIN), |(lo, hi), s| {
            let (min, max) = s.extent();
            (lo.min(min), hi.max(max))
        });
        let range = hi - lo;
        if range > 0.0 {
            (lo - range * 0.1, hi + range * 0.1)
        } else {
            (lo - 0.5, hi + 0.5)
        }
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

    /// Render onto an existing framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot area is empty.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let area = self.axes.plot_area(self.width.min(fb.width()), self.height.min(fb.height()));
        if area.is_empty() {
            return Err(Error::Rendering("Plot area too small".into()));
        }

        let y = LinearScale::new(self.value_domain(), (area.bottom() as f32, area.y as f32))?;
        let map_y = |v: f32| y.scale(v).round() as i32;

        let group_width = area.width as f32 / self.stats.len() as f32;
        let half_box = ((group_width * self.box_width) / 2.0).max(1.0) as i32;
        let cap_half = (half_box / 2).max(1);

        for (i, stats) in self.stats.iter().enumerate() {
            let cx = area.x as i32 + (i as f32 * group_width + group_width / 2.0) as i32;
            let (y_min, y_q1, y_med, y_q3, y_max) = (
                map_y(stats.min),
                map_y(stats.q1),
                map_y(stats.median),
                map_y(stats.q3),
                map_y(stats.max),
            );

            // Whiskers and caps
            draw_line(fb, cx, y_min, cx, y_q1, self.outline_color);
            draw_line(fb, cx, y_q3, cx, y_max, self.outline_color);
            draw_line(fb, cx - cap_half, y_min, cx + cap_half, y_min, self.outline_color);
            draw_line(fb, cx - cap_half, y_max, cx + cap_half, y_max, self.outline_color);

            // Box from Q3 (top) to Q1 (bottom)
            let left = (cx - half_box).max(0) as u32;
            let top = y_q3.max(0) as u32;
            let body = Rect::new(left, top, (2 * half_box) as u32, (y_q1 - y_q3).max(0) as u32 + 1);
            fb.fill_rect(body.x, body.y, body.width, body.height, Rgba::WHITE);
            draw_rect_outline(fb, body, self.outline_color, 1);

            draw_line(fb, cx - half_box, y_med, cx + half_box - 1, y_med, self.median_color);

            for &flier in &stats.outliers {
                draw_circle_outline(fb, cx, map_y(flier), FLIER_RADIUS, self.flier_color);
            }

            self.axes.draw_x_category(fb, area, cx, &self.labels[i]);
        }

        self.axes.draw(fb, area, None, &y);
        Ok(())
    }
}

impl WithDimensions for BoxPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl WithDimensions for BuiltBoxPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Panel for BuiltBoxPlot {
    fn resize(&mut self, width: u32, height: u32) {
        self.set_dimensions(width, height);
    }

    fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        BuiltBoxPlot::render(self, fb)
    }
}
