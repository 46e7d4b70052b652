//! Multi-panel figures.
//!
//! A [`Figure`] splits its canvas into an `nrows x ncols` grid of equal cells
//! and renders one [`Panel`] per cell, row-major. Cells without a panel get an
//! empty frame.

use std::path::Path;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::PngEncoder;
use crate::plots::Axes;
use crate::scale::LinearScale;

/// A plot that can be sized to a grid cell and drawn into it.
pub trait Panel {
    /// Resize to the given cell dimensions before rendering.
    fn resize(&mut self, width: u32, height: u32);

    /// Render onto a framebuffer of the current dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel cannot be drawn at this size.
    fn render(&self, fb: &mut Framebuffer) -> Result<()>;
}

/// Frame with a unit domain, drawn in unused grid cells.
#[derive(Debug, Clone)]
struct EmptyPanel {
    width: u32,
    height: u32,
}

impl Panel for EmptyPanel {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let axes = Axes::new().tick_label_chars(3);
        let area = axes.plot_area(self.width, self.height);
        if area.is_empty() {
            return Ok(());
        }
        let x = LinearScale::new((0.0, 1.0), (area.x as f32, area.right() as f32))?;
        let y = LinearScale::new((0.0, 1.0), (area.bottom() as f32, area.y as f32))?;
        axes.draw(fb, area, Some(&x), &y);
        Ok(())
    }
}

/// Grid of panels rendered into a single image.
pub struct Figure {
    width: u32,
    height: u32,
    nrows: usize,
    ncols: usize,
    background: Rgba,
    panels: Vec<Box<dyn Panel>>,
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("nrows", &self.nrows)
            .field("ncols", &self.ncols)
            .field("panels", &self.panels.len())
            .finish()
    }
}

impl Figure {
    /// Create a single-cell figure of the given pixel size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            nrows: 1,
            ncols: 1,
            background: Rgba::WHITE,
            panels: Vec::new(),
        }
    }

    /// Set the grid shape.
    #[must_use]
    pub fn grid(mut self, nrows: usize, ncols: usize) -> Self {
        self.nrows = nrows;
        self.ncols = ncols;
        self
    }

    /// Append a panel to the next free cell (row-major).
    #[must_use]
    pub fn add_panel<P: Panel + 'static>(mut self, panel: P) -> Self {
        self.panels.push(Box::new(panel));
        self
    }

    /// Number of panels added.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Number of grid cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.nrows * self.ncols
    }

    /// Pixel size of one cell.
    #[must_use]
    pub fn cell_size(&self) -> (u32, u32) {
        if self.nrows == 0 || self.ncols == 0 {
            return (0, 0);
        }
        (self.width / self.ncols as u32, self.height / self.nrows as u32)
    }

    /// Render every cell and compose the figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, there are more panels than
    /// cells, or any panel fails to render.
    pub fn render(&mut self) -> Result<Framebuffer> {
        let (cell_w, cell_h) = self.cell_size();
        if cell_w == 0 || cell_h == 0 {
            return Err(Error::InvalidDimensions {
                width: cell_w,
                height: cell_h,
            });
        }
        if self.panels.len() > self.cell_count() {
            return Err(Error::Rendering(format!(
                "{} panels do not fit a {}x{} grid",
                self.panels.len(),
                self.nrows,
                self.ncols
            )));
        }

        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.background);
        let mut cell = Framebuffer::new(cell_w, cell_h)?;
        let mut empty = EmptyPanel { width: cell_w, height: cell_h };

        for index in 0..self.cell_count() {
            cell.clear(self.background);
            match self.panels.get_mut(index) {
                Some(panel) => {
                    panel.resize(cell_w, cell_h);
                    panel.render(&mut cell)?;
                }
                None => {
                    empty.resize(cell_w, cell_h);
                    empty.render(&mut cell)?;
                }
            }

            let row = (index / self.ncols) as u32;
            let col = (index % self.ncols) as u32;
            fb.blit(&cell, col * cell_w, row * cell_h)?;
        }

        Ok(fb)
    }

    /// Render and write the figure as PNG, replacing any existing file.
    ///
    /// Nothing is written if rendering fails.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding or writing fails.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let fb = self.render()?;
        PngEncoder::write_to_file(&fb, path)
    }
}
