// File: crates/chart-core/src/strategy.rs
// Summary: Per chart-kind point policies plugged into the shared renderer.

use crate::config::ChartKind;
use crate::geometry::Shape;
use crate::resolver;
use crate::scale::ScaleProvider;
use crate::series::{FillStyle, ResolvedPoint, Series};
use crate::session::SessionState;
use crate::types::{DEFAULT_POINT_RADIUS, DEFAULT_TRACK_HEIGHT};

/// How one point is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkSpec {
    pub shape: Shape,
    pub radius: f64,
    pub fill: String,
    pub stroke: Option<String>,
    /// Fill with the shared hatch pattern instead of `fill`.
    pub hashed: bool,
}

impl MarkSpec {
    fn solid(shape: Shape, radius: f64, fill: String) -> Self {
        Self { shape, radius, fill, stroke: None, hashed: false }
    }
}

/// Variant policy of a point chart. The renderer owns the reconciliation loop;
/// strategies only decide geometry and paint.
pub trait PointStrategy {
    fn kind(&self) -> ChartKind;

    /// Pixel position inside the plot, `None` for points that are not drawn.
    fn position(&self, st: &SessionState, series: &Series, point: &ResolvedPoint) -> Option<(f64, f64)> {
        let _ = series;
        resolver::position(&st.scale, point)
    }

    /// Marks index-aligned with `series.internal_values_subset`.
    fn marks(&self, series: &Series) -> Vec<MarkSpec>;

    /// Dim every other point while one is selected.
    fn blur_on_select(&self) -> bool {
        false
    }

    /// Join the points with a `path` connector.
    fn draws_connector(&self) -> bool {
        false
    }

    /// Claim shared resources (tracks, patterns) before drawing.
    fn attach(&self, st: &mut SessionState, series: &Series) {
        let _ = (st, series);
    }

    fn detach(&self, st: &mut SessionState, key: &str) {
        let _ = (st, key);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LineStrategy;

impl PointStrategy for LineStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn marks(&self, series: &Series) -> Vec<MarkSpec> {
        series
            .internal_values_subset
            .iter()
            .map(|p| MarkSpec::solid(series.shape, DEFAULT_POINT_RADIUS, p.color.clone()))
            .collect()
    }

    fn draws_connector(&self) -> bool {
        true
    }
}

/// Weighted bubbles colored by hue or flat color.
#[derive(Clone, Copy, Debug, Default)]
pub struct BubbleStrategy;

impl PointStrategy for BubbleStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Bubble
    }

    fn marks(&self, series: &Series) -> Vec<MarkSpec> {
        series
            .internal_values_subset
            .iter()
            .map(|p| MarkSpec::solid(Shape::Circle, resolver::radius(series, p), resolver::color(series, p)))
            .collect()
    }

    fn blur_on_select(&self) -> bool {
        true
    }
}

/// Single-series bubbles colored from a quantile palette over Y.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShadedBubbleStrategy;

impl PointStrategy for ShadedBubbleStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::ShadedBubble
    }

    fn marks(&self, series: &Series) -> Vec<MarkSpec> {
        let shades = resolver::shade_colors(series);
        series
            .internal_values_subset
            .iter()
            .zip(shades)
            .map(|(p, fill)| {
                let mut mark = MarkSpec::solid(Shape::Circle, resolver::radius(series, p), fill.clone());
                mark.stroke = Some(fill);
                mark
            })
            .collect()
    }

    fn blur_on_select(&self) -> bool {
        true
    }
}

/// One horizontal track per series; Y comes from the track, not the value.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimelineStrategy;

impl TimelineStrategy {
    fn track_height(st: &SessionState) -> f64 {
        let h = st.config.timeline.track_height;
        if h.is_finite() && h > 0.0 { h } else { DEFAULT_TRACK_HEIGHT }
    }
}

impl PointStrategy for TimelineStrategy {
    fn kind(&self) -> ChartKind {
        ChartKind::Timeline
    }

    fn position(&self, st: &SessionState, series: &Series, point: &ResolvedPoint) -> Option<(f64, f64)> {
        point.y?;
        let track = st.tracks.get_index_of(&series.key)?;
        let h = Self::track_height(st);
        Some((st.scale.x(point.x.as_f64()), track as f64 * h + h / 2.0))
    }

    fn marks(&self, series: &Series) -> Vec<MarkSpec> {
        series
            .internal_values_subset
            .iter()
            .map(|p| MarkSpec {
                hashed: p.style == FillStyle::Hashed,
                stroke: Some(p.color.clone()),
                ..MarkSpec::solid(series.shape, DEFAULT_POINT_RADIUS, p.color.clone())
            })
            .collect()
    }

    fn attach(&self, st: &mut SessionState, series: &Series) {
        st.tracks.insert(series.key.clone());
    }

    fn detach(&self, st: &mut SessionState, key: &str) {
        st.tracks.shift_remove(key);
    }
}
