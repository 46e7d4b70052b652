//! Pearson correlation over named columns.

use crate::error::{Error, Result};

/// Pearson correlation of two equally long samples.
///
/// Only rows where both values are finite contribute. Returns NaN when fewer
/// than two such rows exist or either side has zero variance. Finite results
/// are clamped to `[-1, 1]`.
#[must_use]
pub fn pearson(x: &[f32], y: &[f32]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (f64::from(a), f64::from(b)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let (sum_x, sum_y) = pairs.iter().fold((0.0, 0.0), |(sx, sy), (a, b)| (sx + a, sy + b));
    let (mean_x, mean_y) = (sum_x / n, sum_y / n);

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Symmetric matrix of pairwise Pearson correlations.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    /// Row-major `n x n` coefficients.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Correlate every pair of named columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for no columns and
    /// [`Error::DataLengthMismatch`] when columns differ in length.
    pub fn pearson(columns: &[(&str, &[f32])]) -> Result<Self> {
        let first = columns.first().ok_or(Error::EmptyData)?;
        let expected = first.1.len();
        if let Some((_, col)) = columns.iter().find(|(_, col)| col.len() != expected) {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: col.len(),
            });
        }

        let n = columns.len();
        let mut values = vec![f64::NAN; n * n];
        for i in 0..n {
            for j in i..n {
                let r = if i == j {
                    self_correlation(columns[i].1)
                } else {
                    pearson(columns[i].1, columns[j].1)
                };
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        Ok(Self {
            labels: columns.iter().map(|(name, _)| (*name).to_string()).collect(),
            values,
        })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Column names in matrix order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Coefficient at `(row, col)`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let n = self.size();
        (row < n && col < n).then(|| self.values[row * n + col])
    }

    /// Row-major coefficients.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Row-major coefficients narrowed for rendering.
    #[must_use]
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

/// A column correlates perfectly with itself whenever it varies.
fn self_correlation(column: &[f32]) -> f64 {
    if pearson(column, column).is_nan() {
        f64::NAN
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pearson_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&x, &z), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_known_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert_relative_eq!(pearson(&x, &y), 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        let x = [1.0, 2.0, f32::NAN, 4.0];
        let y = [1.0, 2.0, 100.0, 4.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let a = [0.1, 0.5, 0.9, 0.3];
        let b = [3.0, 1.0, 2.0, 5.0];
        let c = [1.0, 2.0, 2.5, 4.0];
        let matrix =
            CorrelationMatrix::pearson(&[("a", &a[..]), ("b", &b[..]), ("c", &c[..])]).unwrap();

        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.labels(), &["a", "b", "c"]);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert!(matrix.get(3, 0).is_none());
    }

    #[test]
    fn test_matrix_constant_column_is_nan() {
        let a = [1.0, 2.0, 3.0];
        let flat = [4.0, 4.0, 4.0];
        let matrix = CorrelationMatrix::pearson(&[("a", &a[..]), ("flat", &flat[..])]).unwrap();
        assert!(matrix.get(1, 1).unwrap().is_nan());
        assert!(matrix.get(0, 1).unwrap().is_nan());
        assert_eq!(matrix.get(0, 0), Some(1.0));
    }

    #[test]
    fn test_matrix_errors() {
        assert!(matches!(CorrelationMatrix::pearson(&[]), Err(Error::EmptyData)));

        let a = [1.0, 2.0];
        let b = [1.0, 2.0, 3.0];
        let result = CorrelationMatrix::pearson(&[("a", &a[..]), ("b", &b[..])]);
        assert!(matches!(
            result,
            Err(Error::DataLengthMismatch { expected: 2, actual: 3 })
        ));
    }
}
