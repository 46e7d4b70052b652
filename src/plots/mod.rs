//! High-level plot types.
//!
//! Provides ready-to-use visualization types with builder APIs. Each plot
//! renders into a framebuffer of its configured size and can be placed in a
//! [`Figure`](crate::figure::Figure) grid.

mod axes;
mod boxplot;
mod heatmap;
mod histogram;

pub use axes::Axes;
pub use boxplot::{BoxPlot, BoxStats, BuiltBoxPlot};
pub use heatmap::Heatmap;
pub use histogram::{BinStrategy, Histogram, HistogramBins};
