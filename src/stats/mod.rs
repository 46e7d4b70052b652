//! Statistics behind the report figures.
//!
//! - [`Summary`]: finite-value extent, mean and sample standard deviation
//! - [`GaussianKde`]: kernel density estimate for histogram overlays
//! - [`CorrelationMatrix`]: pairwise Pearson correlation
//!
//! # References
//!
//! - Scott, D. W. (1992). *Multivariate Density Estimation*. Wiley.
//! - Silverman, B. W. (1986). *Density Estimation for Statistics and Data Analysis*.

mod correlation;
mod kde;
mod summary;

pub use correlation::{pearson, CorrelationMatrix};
pub use kde::{linspace, GaussianKde};
pub use summary::Summary;
