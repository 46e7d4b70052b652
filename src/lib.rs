//! # detox-viz
//!
//! Exploratory figures for a parallel detoxification corpus.
//!
//! The crate loads a tabular dataset of reference/translation pairs and
//! renders three static PNG reports: histograms with kernel density overlays,
//! box plots, and an annotated correlation heatmap. Rendering runs on a small
//! pure-Rust raster pipeline built on [trueno](https://crates.io/crates/trueno)
//! vectors, with no JavaScript, HTML, or system graphics dependencies.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use detox_viz::prelude::*;
//!
//! let dataset = load_df(std::path::Path::new("."))?;
//! let paths = visualize(&dataset)?;
//! for path in paths.iter() {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Scott, D. W. (1992). *Multivariate Density Estimation*. Wiley.
//! - Tukey, J. W. (1977). *Exploratory Data Analysis*. Addison-Wesley.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and palette constants.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Data and Statistics
// ============================================================================

/// Named numeric columns and the delimited-text loader.
pub mod dataset;

/// Summary statistics, kernel density estimation and correlation.
pub mod stats;

// ============================================================================
// Visualization Modules
// ============================================================================

/// High-level plot types (histogram, box plot, heatmap).
pub mod plots;

/// Grid layout of plots into a single image.
pub mod figure;

/// The exploratory report: fixed figure sets and the orchestrator.
pub mod report;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization and bitmap text.
pub mod render;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for detox-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use detox_viz::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;

    pub use crate::color::Rgba;
    pub use crate::dataset::{load_df, Dataset};
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, Panel};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::PngEncoder;
    pub use crate::plots::{Axes, BinStrategy, BoxPlot, Heatmap, Histogram};
    pub use crate::report::{visualize, visualize_with, ReportConfig, ReportPaths};
    pub use crate::scale::{ColorScale, LinearScale, Scale};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
