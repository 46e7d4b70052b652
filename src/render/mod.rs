//! Rendering backends and rasterization.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: Smooth line rendering with sub-pixel accuracy
//! - **Bresenham's Line**: Fast non-antialiased line drawing
//! - **Midpoint Circle**: Outlined circle rendering
//! - **Bitmap text**: 5x7 glyphs at integer scale, horizontal or rotated
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;
mod text;

pub use primitives::{
    draw_circle_outline, draw_line, draw_line_aa, draw_polyline, draw_rect, draw_rect_outline,
};
pub use text::{draw_text, draw_text_vertical, TextAnchor, TextStyle, GLYPH_HEIGHT, GLYPH_WIDTH};
