//! Bitmap text rendering.
//!
//! A fixed 5x7 glyph set covering printable ASCII, scaled by integer factors.
//! Each glyph is five column bytes; bit 0 is the top row.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Glyph width in font pixels.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font pixels.
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, including one pixel of spacing.
const ADVANCE: u32 = GLYPH_WIDTH + 1;

#[rustfmt::skip]
const FONT: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x56, 0x20, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x14, 0x08, 0x3E, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x7F, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x04, 0x08, 0x10, 0x08], // '~'
];

/// Horizontal placement of a text run relative to its anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Anchor is the left edge.
    #[default]
    Start,
    /// Anchor is the horizontal center.
    Middle,
    /// Anchor is the right edge.
    End,
}

/// Size and color of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Integer magnification of the 5x7 glyphs.
    pub scale: u32,
    /// Glyph color.
    pub color: Rgba,
}

impl TextStyle {
    /// Create a style.
    #[must_use]
    pub const fn new(scale: u32, color: Rgba) -> Self {
        Self { scale, color }
    }

    /// Rendered width of `text` in pixels.
    #[must_use]
    pub fn width(&self, text: &str) -> u32 {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return 0;
        }
        (chars * ADVANCE - 1) * self.scale.max(1)
    }

    /// Rendered height of one line in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        GLYPH_HEIGHT * if self.scale == 0 { 1 } else { self.scale }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(1, Rgba::AXIS_GREY)
    }
}

/// Glyph columns for a character; unsupported characters render as '?'.
fn glyph(c: char) -> &'static [u8; 5] {
    let code = c as u32;
    let index = if (0x20..=0x7E).contains(&code) { code - 0x20 } else { u32::from(b'?') - 0x20 };
    &FONT[index as usize]
}

/// Draw text with its top edge at `y` and horizontal placement given by `anchor`.
pub fn draw_text(
    fb: &mut Framebuffer,
    text: &str,
    x: i32,
    y: i32,
    anchor: TextAnchor,
    style: TextStyle,
) {
    let scale = style.scale.max(1) as i32;
    let width = style.width(text) as i32;
    let left = match anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - width / 2,
        TextAnchor::End => x - width,
    };

    for (i, c) in text.chars().enumerate() {
        let origin_x = left + i as i32 * ADVANCE as i32 * scale;
        for (col, bits) in glyph(c).iter().enumerate() {
            for row in 0..GLYPH_HEIGHT as i32 {
                if bits & (1 << row) != 0 {
                    fill_cell(fb, origin_x + col as i32 * scale, y + row * scale, scale, style.color);
                }
            }
        }
    }
}

/// Draw text rotated 90 degrees counter-clockwise (reading bottom to top).
///
/// `x` is the left edge of the rotated run, `center_y` its vertical center.
pub fn draw_text_vertical(fb: &mut Framebuffer, text: &str, x: i32, center_y: i32, style: TextStyle) {
    let scale = style.scale.max(1) as i32;
    let bottom = center_y + style.width(text) as i32 / 2;

    for (i, c) in text.chars().enumerate() {
        let along = i as i32 * ADVANCE as i32 * scale;
        for (col, bits) in glyph(c).iter().enumerate() {
            for row in 0..GLYPH_HEIGHT as i32 {
                if bits & (1 << row) != 0 {
                    let px = x + row * scale;
                    let py = bottom - along - (col as i32 + 1) * scale;
                    fill_cell(fb, px, py, scale, style.color);
                }
            }
        }
    }
}

#[inline]
fn fill_cell(fb: &mut Framebuffer, x: i32, y: i32, size: i32, color: Rgba) {
    if x + size <= 0 || y + size <= 0 {
        return;
    }
    let (x0, y0) = (x.max(0), y.max(0));
    let w = (x + size - x0) as u32;
    let h = (y + size - y0) as u32;
    fb.fill_rect(x0 as u32, y0 as u32, w, h, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_text_width() {
        let style = TextStyle::new(2, Rgba::BLACK);
        assert_eq!(style.width(""), 0);
        assert_eq!(style.width("A"), 10);
        assert_eq!(style.width("AB"), 22);
        assert_eq!(style.height(), 14);
    }

    #[test]
    fn test_glyph_fallback() {
        assert_eq!(glyph('\u{e9}'), glyph('?'));
        assert_eq!(glyph(' '), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_draw_text_sets_pixels() {
        let mut fb = blank(60, 20);
        draw_text(&mut fb, "Hi", 2, 2, TextAnchor::Start, TextStyle::new(1, Rgba::BLACK));

        // 'H' left stem
        assert_eq!(fb.get_pixel(2, 2), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(2, 8), Some(Rgba::BLACK));
        assert!(fb.count_color(Rgba::BLACK) > 10);
    }

    #[test]
    fn test_draw_text_anchor_end() {
        let mut fb = blank(60, 20);
        let style = TextStyle::new(1, Rgba::BLACK);
        draw_text(&mut fb, "L", 30, 0, TextAnchor::End, style);

        // 'L' stem sits at the left of its 5-pixel cell ending at x = 30
        assert_eq!(fb.get_pixel(25, 0), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(31, 6), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_text_vertical() {
        let mut fb = blank(20, 60);
        draw_text_vertical(&mut fb, "Values", 2, 30, TextStyle::new(1, Rgba::BLACK));
        assert!(fb.count_color(Rgba::BLACK) > 20);
        // Nothing drawn beyond the 7-pixel glyph height
        for y in 0..60 {
            assert_eq!(fb.get_pixel(12, y), Some(Rgba::WHITE));
        }
    }

    #[test]
    fn test_draw_text_clipped_does_not_panic() {
        let mut fb = blank(10, 10);
        draw_text(&mut fb, "Clipped text", -20, -3, TextAnchor::Start, TextStyle::new(3, Rgba::BLACK));
        draw_text_vertical(&mut fb, "Clipped", -5, 0, TextStyle::new(3, Rgba::BLACK));
    }
}
