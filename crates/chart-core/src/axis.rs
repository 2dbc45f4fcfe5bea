// File: crates/chart-core/src/axis.rs
// Summary: Axis model: value types, Y axis identifiers and configured limits.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// How values on the X axis are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisType {
    /// Plain numbers.
    #[default]
    Default,
    /// Date-time strings.
    Timeseries,
}

impl AxisType {
    pub const fn expected(&self) -> &'static str {
        match self {
            AxisType::Default => "a number",
            AxisType::Timeseries => "an RFC 3339 date-time string",
        }
    }
}

/// Vertical axis a series is plotted against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisId {
    #[default]
    Y,
    Y2,
}

impl AxisId {
    pub const fn name(&self) -> &'static str {
        match self {
            AxisId::Y => "y",
            AxisId::Y2 => "y2",
        }
    }
}

/// X coordinate exactly as the consumer wrote it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawX {
    Number(f64),
    Text(String),
}

/// X coordinate after type checking against the axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum XValue {
    Number(f64),
    Date(DateTime<Utc>),
}

impl XValue {
    /// Numeric position fed to the X scale; dates map to epoch milliseconds.
    pub fn as_f64(&self) -> f64 {
        match self {
            XValue::Number(v) => *v,
            XValue::Date(d) => d.timestamp_millis() as f64,
        }
    }
}

impl RawX {
    /// Check this value against `axis`, returning `None` on a type mismatch.
    pub fn resolve(&self, axis: AxisType) -> Option<XValue> {
        match (axis, self) {
            (AxisType::Default, RawX::Number(v)) if v.is_finite() => Some(XValue::Number(*v)),
            (AxisType::Timeseries, RawX::Text(s)) => parse_date(s).map(XValue::Date),
            _ => None,
        }
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC) and `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(d.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)).map(|d| d.and_utc())
}

/// Configured limits of one axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    #[serde(default, rename = "type")]
    pub kind: AxisType,
    pub lower_limit: RawX,
    pub upper_limit: RawX,
    #[serde(default)]
    pub label: Option<String>,
}

impl AxisSpec {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { kind: AxisType::Default, lower_limit: RawX::Number(lower), upper_limit: RawX::Number(upper), label: None }
    }

    /// Resolved numeric domain; limits must match the axis type.
    pub fn domain(&self, name: &str) -> Result<(f64, f64)> {
        let resolve = |v: &RawX, index| {
            v.resolve(self.kind).map(|x| x.as_f64()).ok_or_else(|| ChartError::InvalidFormatType {
                key: format!("axis.{name}"),
                index,
                expected: self.kind.expected(),
            })
        };
        Ok((resolve(&self.lower_limit, 0)?, resolve(&self.upper_limit, 1)?))
    }
}

/// All axes of one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub x: AxisSpec,
    pub y: AxisSpec,
    #[serde(default)]
    pub y2: Option<AxisSpec>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self { x: AxisSpec::new(0.0, 10.0), y: AxisSpec::new(0.0, 100.0), y2: None }
    }
}

impl AxisConfig {
    pub fn x_type(&self) -> AxisType {
        self.x.kind
    }
}
