//! Axis decoration shared by the plot types.
//!
//! An [`Axes`] reserves margins inside a panel for the title, axis labels and
//! tick labels, then draws the frame and annotations around the plot area.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::render::{draw_rect_outline, draw_text, draw_text_vertical, TextAnchor, TextStyle};
use crate::scale::{format_tick, LinearScale, Scale};

/// Padding between decoration elements, in pixels at text scale 1.
const PAD: u32 = 6;
/// Length of tick marks outside the frame.
const TICK_LEN: u32 = 4;
/// Approximate number of ticks per axis.
const TICK_TARGET: usize = 5;
/// Horizontal advance per character at scale 1.
const CHAR_ADVANCE: u32 = 6;

/// Title, axis labels, frame and ticks around a plot area.
#[derive(Debug, Clone)]
pub struct Axes {
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    text_scale: u32,
    title_scale: u32,
    /// Characters reserved for y tick labels.
    tick_label_chars: u32,
    /// Whether the bottom margin holds tick labels.
    x_ticks: bool,
    color: Rgba,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes {
    /// Create undecorated axes with default text sizes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            xlabel: None,
            ylabel: None,
            text_scale: 1,
            title_scale: 2,
            tick_label_chars: 6,
            x_ticks: true,
            color: Rgba::AXIS_GREY,
        }
    }

    /// Set the title drawn above the plot area.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the x axis label.
    #[must_use]
    pub fn xlabel(mut self, label: &str) -> Self {
        self.xlabel = Some(label.to_string());
        self
    }

    /// Set the y axis label.
    #[must_use]
    pub fn ylabel(mut self, label: &str) -> Self {
        self.ylabel = Some(label.to_string());
        self
    }

    /// Set the glyph scale for tick and axis labels; the title is one step larger.
    #[must_use]
    pub fn text_scale(mut self, scale: u32) -> Self {
        self.text_scale = scale.max(1);
        self.title_scale = self.text_scale + 1;
        self
    }

    /// Reserve room for y tick labels of this many characters.
    #[must_use]
    pub fn tick_label_chars(mut self, chars: u32) -> Self {
        self.tick_label_chars = chars;
        self
    }

    /// Reserve (or drop) the bottom tick label row.
    #[must_use]
    pub fn x_ticks(mut self, show: bool) -> Self {
        self.x_ticks = show;
        self
    }

    /// Style used for tick labels.
    #[must_use]
    pub fn tick_style(&self) -> TextStyle {
        TextStyle::new(self.text_scale, self.color)
    }

    /// The plot area left inside a `width x height` panel after margins.
    #[must_use]
    pub fn plot_area(&self, width: u32, height: u32) -> Rect {
        let pad = PAD * self.text_scale;
        let text_h = self.tick_style().height();

        let mut left = pad + TICK_LEN + pad / 2 + self.tick_label_chars * CHAR_ADVANCE * self.text_scale;
        if self.ylabel.is_some() {
            left += text_h + pad;
        }

        let mut bottom = pad;
        if self.x_ticks {
            bottom += TICK_LEN + pad / 2 + text_h;
        }
        if self.xlabel.is_some() {
            bottom += text_h + pad;
        }

        let mut top = pad;
        if self.title.is_some() {
            top += TextStyle::new(self.title_scale, self.color).height() + pad;
        }

        Rect::new(0, 0, width, height).inset(left, top, pad * 2, bottom)
    }

    /// Draw frame, ticks, tick labels, axis labels and title.
    ///
    /// Without an x scale only the y axis gets ticks; callers with categorical
    /// x positions label them through [`Axes::draw_x_category`].
    pub fn draw(&self, fb: &mut Framebuffer, area: Rect, x: Option<&LinearScale>, y: &LinearScale) {
        let style = self.tick_style();
        let pad = PAD * self.text_scale;

        draw_rect_outline(fb, area.expand(1), self.color, 1);

        // Y ticks
        let y_step = y.tick_step(TICK_TARGET);
        for tick in y.ticks(TICK_TARGET) {
            self.draw_y_category(fb, area, y.scale(tick).round() as i32, &format_tick(tick, y_step));
        }

        // X ticks
        if let Some(x) = x {
            let x_step = x.tick_step(TICK_TARGET);
            for tick in x.ticks(TICK_TARGET) {
                self.draw_x_category(fb, area, x.scale(tick).round() as i32, &format_tick(tick, x_step));
            }
        }

        let x_label_top = area.bottom() + 1 + TICK_LEN + pad / 2 + if self.x_ticks { style.height() + pad } else { 0 };
        if let Some(label) = &self.xlabel {
            draw_text(fb, label, area.center_x() as i32, x_label_top as i32, TextAnchor::Middle, style);
        }

        if let Some(label) = &self.ylabel {
            draw_text_vertical(fb, label, pad as i32, area.center_y() as i32, style);
        }

        self.draw_title(fb, area);
    }

    /// Draw the title centered above the plot area, shrunk to fit the panel.
    pub fn draw_title(&self, fb: &mut Framebuffer, area: Rect) {
        let Some(title) = &self.title else {
            return;
        };
        let pad = PAD * self.text_scale;
        let title_style = self.fitted_title_style(title, fb.width());
        let top = area.y.saturating_sub(title_style.height() + pad);
        draw_text(fb, title, area.center_x() as i32, top as i32, TextAnchor::Middle, title_style);
    }

    /// Draw one x tick mark with its label under the plot area.
    pub fn draw_x_category(&self, fb: &mut Framebuffer, area: Rect, px: i32, label: &str) {
        let style = self.tick_style();
        let pad = PAD * self.text_scale;
        let px_u = px.max(0) as u32;
        fb.fill_rect(px_u, area.bottom() + 1, 1, TICK_LEN, self.color);
        draw_text(
            fb,
            label,
            px,
            (area.bottom() + 1 + TICK_LEN + pad / 2) as i32,
            TextAnchor::Middle,
            style,
        );
    }

    /// Draw one y tick mark with its label left of the plot area.
    pub fn draw_y_category(&self, fb: &mut Framebuffer, area: Rect, py: i32, label: &str) {
        let style = self.tick_style();
        let pad = PAD * self.text_scale;
        fb.fill_rect(area.x.saturating_sub(TICK_LEN + 1), py.max(0) as u32, TICK_LEN, 1, self.color);
        draw_text(
            fb,
            label,
            area.x.saturating_sub(TICK_LEN + 1 + pad / 2) as i32,
            py - style.height() as i32 / 2,
            TextAnchor::End,
            style,
        );
    }

    /// Largest title scale (up to the configured one) whose text fits the panel.
    fn fitted_title_style(&self, title: &str, max_width: u32) -> TextStyle {
        let mut scale = self.title_scale;
        while scale > 1 && TextStyle::new(scale, self.color).width(title) > max_width {
            scale -= 1;
        }
        TextStyle::new(scale, self.color)
    }
}
