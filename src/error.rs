//! Error types for detox-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data or rendering figures.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, directory creation).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid dimensions for framebuffer, figure or matrix.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Column length mismatch.
    #[error("Data length mismatch: expected {expected} elements, got {actual}")]
    DataLengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// A required dataset column is absent.
    #[error("Missing column: {name}")]
    MissingColumn {
        /// Name of the column that was looked up.
        name: String,
    },

    /// Scale domain error (e.g., equal min and max).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
