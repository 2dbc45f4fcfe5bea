// File: crates/chart-core/src/scale.rs
// Summary: Linear and quantile scales plus the per-axis scale provider used by renderers.

use crate::axis::{AxisConfig, AxisId};
use crate::error::Result;

/// Per-axis mapping from data values to plot pixels.
pub trait ScaleProvider {
    fn x(&self, v: f64) -> f64;
    fn y(&self, v: f64) -> f64;
    fn y2(&self, v: f64) -> f64;

    /// Map `v` through the Y scale selected by `axis`.
    fn y_for(&self, axis: AxisId, v: f64) -> f64 {
        match axis {
            AxisId::Y => self.y(v),
            AxisId::Y2 => self.y2(v),
        }
    }
}

/// Continuous `domain -> range` mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Degenerate domains (min == max) map everything to the range start.
    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span.abs() < 1e-12 || !span.is_finite() {
            return self.range.0;
        }
        self.range.0 + (v - self.domain.0) / span * (self.range.1 - self.range.0)
    }

    /// Fraction of the domain covered by `v`, clamped to [0, 1].
    pub fn unit(&self, v: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span.abs() < 1e-12 || !span.is_finite() {
            return 0.0;
        }
        ((v - self.domain.0) / span).clamp(0.0, 1.0)
    }
}

/// Scales for one plot area, rebuilt whenever the canvas size changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartScale {
    pub x: LinearScale,
    pub y: LinearScale,
    pub y2: LinearScale,
}

impl ChartScale {
    /// Build scales for a plot of `width` x `height` pixels from configured axis limits.
    /// The Y range is inverted so larger values sit higher on screen.
    pub fn from_axes(axes: &AxisConfig, width: f64, height: f64) -> Result<Self> {
        let x = LinearScale::new(axes.x.domain("x")?, (0.0, width.max(0.0)));
        let y = LinearScale::new(axes.y.domain("y")?, (height.max(0.0), 0.0));
        let y2 = match &axes.y2 {
            Some(spec) => LinearScale::new(spec.domain("y2")?, (height.max(0.0), 0.0)),
            None => y,
        };
        Ok(Self { x, y, y2 })
    }
}

impl ScaleProvider for ChartScale {
    fn x(&self, v: f64) -> f64 { self.x.apply(v) }
    fn y(&self, v: f64) -> f64 { self.y.apply(v) }
    fn y2(&self, v: f64) -> f64 { self.y2.apply(v) }
}

/// Discrete scale that splits a sample into equally populated buckets,
/// one per range entry.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantileScale<T> {
    thresholds: Vec<f64>,
    range: Vec<T>,
}

impl<T: Clone> QuantileScale<T> {
    pub fn new(domain: &[f64], range: Vec<T>) -> Self {
        let mut sorted: Vec<f64> = domain.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let n = range.len();
        let thresholds = if sorted.is_empty() || n < 2 {
            Vec::new()
        } else {
            (1..n).map(|i| quantile_sorted(&sorted, i as f64 / n as f64)).collect()
        };
        Self { thresholds, range }
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn apply(&self, v: f64) -> Option<T> {
        if self.range.is_empty() {
            return None;
        }
        // bisect right: values equal to a threshold fall in the upper bucket
        let idx = self.thresholds.partition_point(|t| *t <= v);
        self.range.get(idx.min(self.range.len() - 1)).cloned()
    }
}

/// Linear-interpolated quantile (R-7) of an ascending slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
        }
    }
}
