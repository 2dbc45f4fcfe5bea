// File: crates/chart-core/src/series.rs
// Summary: Series model: consumer input (JSON), loaded series with resolved points, ranges and regions.
// Notes:
// - `SeriesInput` is what consumers hand over; controls clone it, so later edits to the
//   caller's copy never leak into a loaded chart.
// - `Series` is the loaded form ("data target") and owns the resolved points.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::axis::{AxisId, RawX, XValue};
use crate::error::{ChartError, Result};
use crate::geometry::Shape;
use crate::interaction::ResetHandle;
use crate::scene::NodeId;
use crate::types::DEFAULT_COLOR;

/// Consumer click callback: `(reset, series_key, point_index, point, target_node)`.
pub type ClickHandler = Rc<dyn Fn(ResetHandle, &str, usize, &ResolvedPoint, NodeId)>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillStyle {
    #[default]
    Normal,
    Hashed,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Label {
    pub display: String,
    pub is_hidden: bool,
}

/// Bubble radius parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weight {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Fixed radius used verbatim instead of interpolating.
    pub fixed: Option<f64>,
    /// Radius override used verbatim when `fixed` is absent.
    pub max_radius: Option<f64>,
}

impl Weight {
    /// The weight domain, present only when both bounds are set and no radius override is.
    pub fn range(&self) -> Option<(f64, f64)> {
        match (self.min, self.max, self.fixed.or(self.max_radius)) {
            (Some(min), Some(max), None) => Some((min, max)),
            _ => None,
        }
    }
}

/// Two-stop color gradient for bubbles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hue {
    pub lower_shade: String,
    pub upper_shade: String,
}

/// Value band drawn behind a series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionSpec {
    pub axis: Option<AxisId>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub color: Option<String>,
}

impl RegionSpec {
    /// At least one bound, all bounds finite, and `start <= end`.
    pub fn is_valid(&self) -> bool {
        let finite = |v: Option<f64>| v.map_or(true, f64::is_finite);
        match (self.start, self.end) {
            (None, None) => false,
            (Some(s), Some(e)) => s.is_finite() && e.is_finite() && s <= e,
            (s, e) => finite(s) && finite(e),
        }
    }
}

/// One raw data point as supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPoint {
    pub x: RawX,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub is_critical: Option<bool>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub y_axis: Option<AxisId>,
    #[serde(default)]
    pub style: Option<FillStyle>,
}

impl RawPoint {
    pub fn new(x: impl Into<RawX>, y: Option<f64>) -> Self {
        Self { x: x.into(), y, weight: None, is_critical: None, color: None, label: None, y_axis: None, style: None }
    }

    pub fn weighted(x: impl Into<RawX>, y: f64, weight: f64) -> Self {
        Self { weight: Some(weight), ..Self::new(x, Some(y)) }
    }
}

impl From<f64> for RawX {
    fn from(v: f64) -> Self {
        RawX::Number(v)
    }
}

impl From<&str> for RawX {
    fn from(v: &str) -> Self {
        RawX::Text(v.to_string())
    }
}

/// Series as handed over by the consumer.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesInput {
    pub key: Option<String>,
    pub color: Option<String>,
    pub label: Option<Label>,
    pub shape: Option<Shape>,
    pub palette: Option<Vec<String>>,
    pub y_axis: Option<AxisId>,
    pub style: Option<FillStyle>,
    pub values: Vec<RawPoint>,
    pub regions: Vec<RegionSpec>,
    pub weight: Option<Weight>,
    pub hue: Option<Hue>,
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
}

impl fmt::Debug for SeriesInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesInput")
            .field("key", &self.key)
            .field("values", &self.values.len())
            .field("regions", &self.regions.len())
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

impl SeriesInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: Some(key.into()), ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_values(mut self, values: Vec<RawPoint>) -> Self {
        self.values = values;
        self
    }

    pub fn with_on_click(mut self, f: impl Fn(ResetHandle, &str, usize, &ResolvedPoint, NodeId) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }
}

/// Min/max of one dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    fn include(this: &mut Option<Extent>, v: f64) {
        match this {
            Some(e) => {
                e.min = e.min.min(v);
                e.max = e.max.max(v);
            }
            None => *this = Some(Extent { min: v, max: v }),
        }
    }
}

/// Extents over the non-null points of a series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValuesRange {
    pub x: Option<Extent>,
    pub y: Option<Extent>,
}

impl ValuesRange {
    pub fn of(points: &[ResolvedPoint]) -> Self {
        let mut range = ValuesRange::default();
        for p in points {
            let Some(y) = p.y else { continue };
            Extent::include(&mut range.x, p.x.as_f64());
            Extent::include(&mut range.y, y);
        }
        range
    }
}

/// A data point after type checking and default filling.
#[derive(Clone)]
pub struct ResolvedPoint {
    pub x: XValue,
    /// `None` keeps the slot but draws nothing.
    pub y: Option<f64>,
    pub weight: Option<f64>,
    pub is_critical: bool,
    pub color: String,
    pub label: Option<String>,
    pub y_axis: AxisId,
    pub style: FillStyle,
    /// Key of the owning series.
    pub key: String,
    pub on_click: Option<ClickHandler>,
}

impl fmt::Debug for ResolvedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedPoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("weight", &self.weight)
            .field("is_critical", &self.is_critical)
            .field("color", &self.color)
            .field("label", &self.label)
            .field("y_axis", &self.y_axis)
            .field("style", &self.style)
            .field("key", &self.key)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl PartialEq for ResolvedPoint {
    fn eq(&self, other: &Self) -> bool {
        let same_handler = match (&self.on_click, &other.on_click) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.x == other.x
            && self.y == other.y
            && self.weight == other.weight
            && self.is_critical == other.is_critical
            && self.color == other.color
            && self.label == other.label
            && self.y_axis == other.y_axis
            && self.style == other.style
            && self.key == other.key
            && same_handler
    }
}

/// A loaded series ("data target").
#[derive(Clone)]
pub struct Series {
    pub key: String,
    pub color: String,
    pub label: Option<Label>,
    pub shape: Shape,
    pub palette: Option<Vec<String>>,
    pub y_axis: AxisId,
    pub style: FillStyle,
    pub values: Vec<RawPoint>,
    pub internal_values_subset: Vec<ResolvedPoint>,
    pub values_range: ValuesRange,
    pub regions: Vec<RegionSpec>,
    pub weight: Option<Weight>,
    pub hue: Option<Hue>,
    pub on_click: Option<ClickHandler>,
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("key", &self.key)
            .field("color", &self.color)
            .field("shape", &self.shape)
            .field("y_axis", &self.y_axis)
            .field("internal_values_subset", &self.internal_values_subset)
            .field("values_range", &self.values_range)
            .field("regions", &self.regions)
            .finish_non_exhaustive()
    }
}

impl Series {
    /// Structural validation plus default filling. Points are not resolved here.
    pub fn from_input(input: &SeriesInput) -> Result<Self> {
        let key = match input.key.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => return Err(ChartError::UniqueKeyNotProvided),
        };
        if input.values.is_empty() {
            return Err(ChartError::NoValuesProvided(key));
        }
        if let Some(index) = input.regions.iter().position(|r| !r.is_valid()) {
            return Err(ChartError::InvalidRegionBounds { key, index });
        }
        Ok(Self {
            key,
            color: input.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            label: input.label.clone(),
            shape: input.shape.unwrap_or_default(),
            palette: input.palette.clone(),
            y_axis: input.y_axis.unwrap_or_default(),
            style: input.style.unwrap_or_default(),
            values: input.values.clone(),
            internal_values_subset: Vec::new(),
            values_range: ValuesRange::default(),
            regions: input.regions.clone(),
            weight: input.weight,
            hue: input.hue.clone(),
            on_click: input.on_click.clone(),
        })
    }

    /// Resolved points that will be drawn, with their original indices.
    pub fn rendered_points(&self) -> impl Iterator<Item = (usize, &ResolvedPoint)> {
        self.internal_values_subset.iter().enumerate().filter(|(_, p)| p.y.is_some())
    }
}
