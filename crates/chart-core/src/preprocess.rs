// File: crates/chart-core/src/preprocess.rs
// Summary: Turns raw series values into index-aligned resolved points; validation happens up front.

use tracing::trace;

use crate::axis::AxisConfig;
use crate::error::{ChartError, Result};
use crate::series::{ResolvedPoint, Series, ValuesRange};

/// Resolve every raw value of `series` against the X axis type.
///
/// The whole input is checked before a single point is produced, so a type
/// mismatch leaves no partial output behind. Always rebuilds from
/// `series.values`, which makes repeated calls yield identical results.
pub fn preprocess(axis: &AxisConfig, series: &Series) -> Result<Vec<ResolvedPoint>> {
    let x_type = axis.x_type();
    let xs = series
        .values
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            raw.x.resolve(x_type).ok_or_else(|| ChartError::InvalidFormatType {
                key: series.key.clone(),
                index,
                expected: x_type.expected(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let points: Vec<ResolvedPoint> = series
        .values
        .iter()
        .zip(xs)
        .map(|(raw, x)| ResolvedPoint {
            x,
            y: raw.y.filter(|y| y.is_finite()),
            weight: raw.weight,
            is_critical: raw.is_critical.unwrap_or(false),
            color: raw.color.clone().unwrap_or_else(|| series.color.clone()),
            label: raw.label.clone().or_else(|| series.label.as_ref().map(|l| l.display.clone())),
            y_axis: raw.y_axis.unwrap_or(series.y_axis),
            style: raw.style.unwrap_or(series.style),
            key: series.key.clone(),
            on_click: series.on_click.clone(),
        })
        .collect();
    trace!(key = %series.key, points = points.len(), "preprocessed series");
    Ok(points)
}

/// Preprocess and store the result on `series`, refreshing its value range.
pub fn resolve_series(axis: &AxisConfig, series: &mut Series) -> Result<()> {
    let points = preprocess(axis, series)?;
    series.values_range = ValuesRange::of(&points);
    series.internal_values_subset = points;
    Ok(())
}
