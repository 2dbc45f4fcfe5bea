// File: crates/chart-core/src/resolver.rs
// Summary: Pure position, radius and color decisions for a resolved point.

use tracing::warn;

use crate::color::interpolate;
use crate::scale::{LinearScale, QuantileScale, ScaleProvider};
use crate::series::{ResolvedPoint, Series};
use crate::types::{DEFAULT_BUBBLE_RADIUS_MAX, DEFAULT_BUBBLE_RADIUS_MIN, DEFAULT_SHADE_PALETTE};

/// Screen position of `point` inside the plot, or `None` when it has no Y value.
pub fn position(scale: &dyn ScaleProvider, point: &ResolvedPoint) -> Option<(f64, f64)> {
    let y = point.y?;
    Some((scale.x(point.x.as_f64()), scale.y_for(point.y_axis, y)))
}

/// Pixel range weighted bubbles are interpolated into.
pub fn radius_bounds() -> (f64, f64) {
    (DEFAULT_BUBBLE_RADIUS_MIN, DEFAULT_BUBBLE_RADIUS_MAX)
}

/// Weight -> radius scale, present only for weight-ranged series.
pub fn radius_scale(series: &Series) -> Option<LinearScale> {
    let domain = series.weight?.range()?;
    Some(LinearScale::new(domain, radius_bounds()))
}

/// Bubble radius in pixels.
///
/// Decision order: interpolate by weight when the series declares a weight
/// range and no override; the default maximum when it has no weight settings
/// at all; otherwise the `fixed` (or else `maxRadius`) override as given.
pub fn radius(series: &Series, point: &ResolvedPoint) -> f64 {
    if let Some(scale) = radius_scale(series) {
        let weight = point.weight.unwrap_or(scale.domain.0);
        return scale.apply(weight).max(0.0);
    }
    match series.weight {
        None => DEFAULT_BUBBLE_RADIUS_MAX,
        Some(w) => w.fixed.or(w.max_radius).unwrap_or(DEFAULT_BUBBLE_RADIUS_MAX),
    }
}

/// Bubble fill color.
///
/// With a hue and a weight range the radius picks the shade; with a hue only
/// the Y value (over the series' Y extent) does; otherwise the flat color.
pub fn color(series: &Series, point: &ResolvedPoint) -> String {
    let Some(hue) = &series.hue else {
        return point.color.clone();
    };
    let t = match radius_scale(series) {
        Some(_) => {
            let (lo, hi) = radius_bounds();
            LinearScale::new((lo, hi), (0.0, 1.0)).unit(radius(series, point))
        }
        None => match (series.values_range.y, point.y) {
            (Some(extent), Some(y)) => LinearScale::new((extent.min, extent.max), (0.0, 1.0)).unit(y),
            _ => 0.0,
        },
    };
    interpolate(&hue.lower_shade, &hue.upper_shade, t)
}

/// Fit a shade palette to the number of drawn points. Never touches the input.
///
/// One point takes the darkest shade, two points the two extremes, and four
/// points drop the middle entry of an odd palette of five or more. Every
/// other count keeps the palette as is.
pub fn resolve_palette(palette: &[String], point_count: usize) -> Vec<String> {
    let n = palette.len();
    match point_count {
        _ if n == 0 => Vec::new(),
        1 => vec![palette[n - 1].clone()],
        2 if n >= 2 => vec![palette[0].clone(), palette[n - 1].clone()],
        4 if n >= 5 && n % 2 == 1 => palette
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != n / 2)
            .map(|(_, c)| c.clone())
            .collect(),
        _ => palette.to_vec(),
    }
}

/// Index-aligned colors for a single-series shaded bubble chart.
/// Null points keep the series color so indices stay aligned.
pub fn shade_colors(series: &Series) -> Vec<String> {
    let palette: Vec<String> = match &series.palette {
        Some(p) => p.clone(),
        None => DEFAULT_SHADE_PALETTE.iter().map(|c| c.to_string()).collect(),
    };
    let ys: Vec<f64> = series.rendered_points().filter_map(|(_, p)| p.y).collect();
    let range = resolve_palette(&palette, ys.len());
    if range.is_empty() {
        warn!(key = %series.key, "empty shade palette, falling back to series color");
    }
    let scale = QuantileScale::new(&ys, range);
    series
        .internal_values_subset
        .iter()
        .map(|p| p.y.and_then(|y| scale.apply(y)).unwrap_or_else(|| series.color.clone()))
        .collect()
}
