//! Annotated heatmap for labelled matrices.
//!
//! Renders a grid of values as colored cells using a diverging color scale,
//! with optional per-cell value annotations and a colorbar. Non-finite cells
//! are left blank.
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Moreland, K. (2009). "Diverging Color Maps for Scientific Visualization."

use batuta_common::display::WithDimensions;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::Panel;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::plots::Axes;
use crate::render::{draw_rect_outline, draw_text, TextAnchor, TextStyle};
use crate::scale::{format_tick, ColorScale, LinearScale, Scale};

/// Colorbar strip width.
const COLORBAR_WIDTH: u32 = 16;
/// Gap between the cells and the colorbar.
const COLORBAR_GAP: u32 = 12;
/// Characters reserved for colorbar tick labels.
const COLORBAR_LABEL_CHARS: u32 = 5;
/// Domain used when no cell is finite.
const FALLBACK_DOMAIN: (f32, f32) = (-1.0, 1.0);

/// Builder for creating heatmaps.
#[derive(Debug, Clone)]
pub struct Heatmap {
    /// Matrix in row-major order.
    data: Vec<f32>,
    rows: usize,
    cols: usize,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    /// Decimal places for cell annotations, if annotated.
    annotate: Option<usize>,
    colorbar: bool,
    border_color: Rgba,
    width: u32,
    height: u32,
    axes: Axes,
}

impl Default for Heatmap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heatmap {
    /// Create a new heatmap builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
            row_labels: Vec::new(),
            col_labels: Vec::new(),
            annotate: None,
            colorbar: false,
            border_color: Rgba::WHITE,
            width: 600,
            height: 400,
            axes: Axes::new(),
        }
    }

    /// Set data from a row-major slice.
    #[must_use]
    pub fn data(mut self, data: &[f32], rows: usize, cols: usize) -> Self {
        self.data = data.to_vec();
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Label rows (top to bottom).
    #[must_use]
    pub fn row_labels(mut self, labels: &[&str]) -> Self {
        self.row_labels = labels.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Label columns (left to right).
    #[must_use]
    pub fn col_labels(mut self, labels: &[&str]) -> Self {
        self.col_labels = labels.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Write each finite value into its cell with `decimals` places.
    #[must_use]
    pub fn annotate(mut self, decimals: usize) -> Self {
        self.annotate = Some(decimals);
        self
    }

    /// Show a colorbar right of the cells.
    #[must_use]
    pub fn colorbar(mut self, show: bool) -> Self {
        self.colorbar = show;
        self
    }

    /// Set the title.
    #[must_use]
    pub fn axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    /// Build and validate the heatmap.
    ///
    /// # Errors
    ///
    /// Returns an error if data is empty, dimensions are zero, or the data or
    /// label counts don't match the dimensions.
    pub fn build(mut self) -> Result<Self> {
        if self.data.is_empty() {
            return Err(Error::EmptyData);
        }

        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidDimensions {
                width: self.cols as u32,
                height: self.rows as u32,
            });
        }

        let expected = self.rows * self.cols;
        if self.data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: self.data.len(),
            });
        }

        for (labels, expected) in [(&self.row_labels, self.rows), (&self.col_labels, self.cols)] {
            if !labels.is_empty() && labels.len() != expected {
                return Err(Error::DataLengthMismatch {
                    expected,
                    actual: labels.len(),
                });
            }
        }

        let label_chars = self.row_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        self.axes = self.axes.tick_label_chars(label_chars as u32).x_ticks(!self.col_labels.is_empty());
        Ok(self)
    }

    /// Color domain: finite extent, widened by 0.5 on each side when flat.
    #[must_use]
    pub fn color_domain(&self) -> (f32, f32) {
        let (min, max) = self
            .data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if min > max {
            FALLBACK_DOMAIN
        } else if (max - min).abs() < f32::EPSILON {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        }
    }

    /// Value at `(row, col)`.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<f32> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Get the number of rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[must_use]
    pub const fn col_count(&self) -> usize {
        self.cols
    }

    /// Cell region inside a `width x height` panel, colorbar excluded.
    fn cell_area(&self, width: u32, height: u32) -> Rect {
        let area = self.axes.plot_area(width, height);
        if !self.colorbar {
            return area;
        }
        let style = self.axes.tick_style();
        let reserved = COLORBAR_GAP + COLORBAR_WIDTH + style.width(" ") + COLORBAR_LABEL_CHARS * 6 * style.scale;
        area.inset(0, 0, reserved, 0)
    }

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or too small.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);
        self.render(&mut fb)?;
        Ok(fb)
    }

    /// Render the heatmap onto an existing framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no room for at least one pixel per cell.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let area = self.cell_area(self.width.min(fb.width()), self.height.min(fb.height()));
        let cell_w = area.width / self.cols as u32;
        let cell_h = area.height / self.rows as u32;
        if cell_w == 0 || cell_h == 0 {
            return Err(Error::Rendering("Plot area too small".into()));
        }
        // Snap to whole cells
        let area = Rect::new(area.x, area.y, cell_w * self.cols as u32, cell_h * self.rows as u32);

        let colors = ColorScale::coolwarm(self.color_domain())?;
        let text = self.axes.tick_style();

        for row in 0..self.rows {
            for col in 0..self.cols {
                let value = self.data[row * self.cols + col];
                if !value.is_finite() {
                    continue;
                }
                let cell = Rect::new(area.x + col as u32 * cell_w, area.y + row as u32 * cell_h, cell_w, cell_h);
                let fill = colors.scale(value);
                fb.fill_rect(cell.x, cell.y, cell.width, cell.height, fill);
                draw_rect_outline(fb, cell, self.border_color, 1);

                if let Some(decimals) = self.annotate {
                    let label = format!("{value:.decimals$}");
                    let style = TextStyle::new(text.scale, fill.contrasting_text());
                    let top = cell.center_y() as i32 - style.height() as i32 / 2;
                    draw_text(fb, &label, cell.center_x() as i32, top, TextAnchor::Middle, style);
                }
            }
        }

        for (col, label) in self.col_labels.iter().enumerate() {
            let px = area.x + col as u32 * cell_w + cell_w / 2;
            self.axes.draw_x_category(fb, area, px as i32, label);
        }
        for (row, label) in self.row_labels.iter().enumerate() {
            let py = area.y + row as u32 * cell_h + cell_h / 2;
            self.axes.draw_y_category(fb, area, py as i32, label);
        }

        if self.colorbar {
            self.draw_colorbar(fb, area, &colors, text)?;
        }

        self.axes.draw_title(fb, area);
        Ok(())
    }

    /// Vertical gradient strip with value ticks, max at the top.
    fn draw_colorbar(&self, fb: &mut Framebuffer, cells: Rect, colors: &ColorScale, text: TextStyle) -> Result<()> {
        let bar = Rect::new(cells.right() + COLORBAR_GAP, cells.y, COLORBAR_WIDTH, cells.height);
        let (lo, hi) = colors.domain();
        let values = LinearScale::new((lo, hi), (bar.bottom() as f32 - 1.0, bar.y as f32))?;

        for py in bar.y..bar.bottom() {
            let color = colors.scale(values.invert(py as f32));
            fb.fill_rect(bar.x, py, bar.width, 1, color);
        }
        draw_rect_outline(fb, bar, self.axes.tick_style().color, 1);

        let step = values.tick_step(5);
        for tick in values.ticks(5) {
            let py = values.scale(tick).round() as i32;
            fb.fill_rect(bar.right(), py.max(0) as u32, 3, 1, text.color);
            draw_text(
                fb,
                &format_tick(tick, step),
                (bar.right() + 3 + text.scale * 2) as i32,
                py - text.height() as i32 / 2,
                TextAnchor::Start,
                text,
            );
        }
        Ok(())
    }
}

impl WithDimensions for Heatmap {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Panel for Heatmap {
    fn resize(&mut self, width: u32, height: u32) {
        self.set_dimensions(width, height);
    }

    fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        Heatmap::render(self, fb)
    }
}
