//! Gaussian kernel density estimation.

use super::Summary;

/// Samples above this size are pre-binned before evaluation.
const PREBIN_THRESHOLD: usize = 4096;
/// Number of weighted points used for pre-binned samples.
const PREBIN_POINTS: usize = 1024;
/// Kernel contributions beyond this many bandwidths are negligible.
const KERNEL_CUTOFF: f64 = 8.0;

/// Gaussian KDE with Scott's rule bandwidth (`sigma * n^(-1/5)`).
#[derive(Debug, Clone)]
pub struct GaussianKde {
    /// Kernel centers with their weights (raw samples carry weight 1).
    points: Vec<(f64, f64)>,
    /// Total weight, i.e. the number of samples.
    total: f64,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a density to the finite values of `data`.
    ///
    /// Returns `None` for fewer than two finite values or zero variance,
    /// where a Gaussian kernel density is undefined.
    #[must_use]
    pub fn fit(data: &[f32]) -> Option<Self> {
        let summary = Summary::of(data)?;
        if summary.count < 2 || summary.std_dev <= 0.0 {
            return None;
        }

        let n = summary.count as f64;
        let bandwidth = f64::from(summary.std_dev) * n.powf(-0.2);
        let finite = data.iter().copied().filter(|v| v.is_finite());

        let points = if summary.count > PREBIN_THRESHOLD {
            let lo = f64::from(summary.min);
            let width = f64::from(summary.range()) / PREBIN_POINTS as f64;
            let mut weights = vec![0.0f64; PREBIN_POINTS];
            for v in finite {
                let idx = ((f64::from(v) - lo) / width) as usize;
                weights[idx.min(PREBIN_POINTS - 1)] += 1.0;
            }
            weights
                .into_iter()
                .enumerate()
                .filter(|(_, w)| *w > 0.0)
                .map(|(i, w)| (lo + (i as f64 + 0.5) * width, w))
                .collect()
        } else {
            finite.map(|v| (f64::from(v), 1.0)).collect()
        };

        Some(Self { points, total: n, bandwidth })
    }

    /// Kernel bandwidth.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.total * self.bandwidth * (2.0 * std::f64::consts::PI).sqrt());
        let sum: f64 = self
            .points
            .iter()
            .filter_map(|&(center, weight)| {
                let u = (x - center) / self.bandwidth;
                (u.abs() < KERNEL_CUTOFF).then(|| weight * (-0.5 * u * u).exp())
            })
            .sum();
        sum * norm
    }

    /// Density evaluated at every grid position.
    #[must_use]
    pub fn evaluate(&self, grid: &[f64]) -> Vec<f64> {
        grid.iter().map(|&x| self.density(x)).collect()
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
