//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or either bound is not finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Round-number tick positions inside the domain.
    ///
    /// Produces roughly `target` ticks with a step of 1, 2 or 5 times a power of ten.
    #[must_use]
    pub fn ticks(&self, target: usize) -> Vec<f32> {
        let lo = self.domain_min.min(self.domain_max);
        let hi = self.domain_min.max(self.domain_max);
        let step = nice_step((hi - lo) / target.max(1) as f32);

        let first = (lo / step).ceil() * step;
        let tolerance = step * 1e-3;
        (0..=target * 3)
            .map(|i| first + i as f32 * step)
            .take_while(|&v| v <= hi + tolerance)
            .collect()
    }

    /// Step between consecutive ticks for `target` ticks.
    #[must_use]
    pub fn tick_step(&self, target: usize) -> f32 {
        nice_step((self.domain_max - self.domain_min).abs() / target.max(1) as f32)
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Snap a raw step to 1, 2, 5 or 10 times a power of ten.
fn nice_step(raw: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f32.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Format a tick value with as many decimals as the tick step needs.
#[must_use]
pub fn format_tick(value: f32, step: f32) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    // "-0" and "-0.00" read as noise on an axis
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Color scale for continuous-to-color mapping.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale with evenly spaced color stops.
    ///
    /// # Errors
    ///
    /// Returns an error if no colors are given or the domain is degenerate.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Diverging blue-grey-red scale (matplotlib "coolwarm").
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is degenerate.
    pub fn coolwarm(domain: (f32, f32)) -> Result<Self> {
        Self::new(
            vec![
                Rgba::rgb(59, 76, 192),
                Rgba::rgb(141, 176, 254),
                Rgba::rgb(221, 220, 220),
                Rgba::rgb(244, 154, 123),
                Rgba::rgb(180, 4, 38),
            ],
            domain,
        )
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // Screen y grows downward
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 100.0).abs() < 0.001);
        assert!((scale.scale(10.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert!((scale.invert(0.5) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_degenerate_domain() {
        assert!(LinearScale::new((1.0, 1.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f32::NAN, 1.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_ticks_are_round_numbers() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("operation should succeed");
        let ticks = scale.ticks(5);
        assert_eq!(ticks.len(), 6);
        assert!((ticks[1] - 0.2).abs() < 1e-6);
        assert!((ticks[5] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ticks_stay_inside_domain() {
        let scale = LinearScale::new((-3.7, 41.2), (0.0, 1.0)).expect("operation should succeed");
        for tick in scale.ticks(5) {
            assert!((-3.7..=41.2).contains(&tick), "tick {tick} out of domain");
        }
    }

    #[test]
    fn test_nice_step() {
        assert!((nice_step(0.13) - 0.1).abs() < 1e-6);
        assert!((nice_step(0.27) - 0.2).abs() < 1e-6);
        assert!((nice_step(42.0) - 50.0).abs() < 1e-4);
        assert!((nice_step(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.2, 0.2), "0.2");
        assert_eq!(format_tick(150.0, 50.0), "150");
        assert_eq!(format_tick(-0.0001, 0.05), "0.00");
        assert_eq!(format_tick(-0.5, 0.1), "-0.5");
    }

    #[test]
    fn test_color_scale() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");

        let mid = scale.scale(0.5);
        assert!(mid.r > 100 && mid.r < 150);
        assert_eq!(scale.scale(-5.0), Rgba::BLACK);
    }

    #[test]
    fn test_coolwarm_endpoints() {
        let scale = ColorScale::coolwarm((-1.0, 1.0)).expect("coolwarm should build");
        let cold = scale.scale(-1.0);
        let warm = scale.scale(1.0);
        assert!(cold.b > cold.r);
        assert!(warm.r > warm.b);
        assert!(ColorScale::coolwarm((0.3, 0.3)).is_err());
    }
}
