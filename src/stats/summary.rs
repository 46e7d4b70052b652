//! Descriptive statistics over the finite values of a column.

use trueno::Vector;

/// Extent and moments of a sample, ignoring NaN and infinite values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of finite values.
    pub count: usize,
    /// Smallest finite value.
    pub min: f32,
    /// Largest finite value.
    pub max: f32,
    /// Arithmetic mean.
    pub mean: f32,
    /// Sample standard deviation (n - 1 denominator); zero for a single value.
    pub std_dev: f32,
}

impl Summary {
    /// Summarize the finite values of `values`.
    ///
    /// Returns `None` when no finite value is present.
    #[must_use]
    pub fn of(values: &[f32]) -> Option<Self> {
        let finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        let count = finite.len();
        let first = finite[0];

        let vec = Vector::from_vec(finite);
        let min = vec.min().unwrap_or(first);
        let max = vec.max().unwrap_or(first);
        let mean = vec.mean().unwrap_or(first);

        let std_dev = if count < 2 {
            0.0
        } else {
            let mean64 = f64::from(mean);
            let sum_sq: f64 = vec
                .as_slice()
                .iter()
                .map(|&v| (f64::from(v) - mean64).powi(2))
                .sum();
            (sum_sq / (count - 1) as f64).sqrt() as f32
        };

        Some(Self { count, min, max, mean, std_dev })
    }

    /// Distance between the largest and smallest value.
    #[must_use]
    pub fn range(&self) -> f32 {
        self.max - self.min
    }
}
