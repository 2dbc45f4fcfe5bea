// File: crates/chart-core/src/geometry.rs
// Summary: Mark shapes, SVG path builders and translate helpers for pixel math.

use serde::{Deserialize, Serialize};

/// Glyph drawn for a single data point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
    Cross,
}

impl Shape {
    /// SVG element used to draw the shape.
    pub const fn tag(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            _ => "path",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Diamond => "diamond",
            Shape::Cross => "cross",
        }
    }

    /// Path data centered on the origin with circumradius `r`.
    /// Returns `None` for circles, which are drawn with an `r` attribute instead.
    pub fn path(&self, r: f64) -> Option<String> {
        let h = r * std::f64::consts::FRAC_1_SQRT_2;
        let d = match self {
            Shape::Circle => return None,
            Shape::Square => format!("M{},{}H{}V{}H{}Z", num(-h), num(-h), num(h), num(h), num(-h)),
            Shape::Triangle => {
                let base = r * 0.866_025_403_784_438_6;
                format!("M0,{}L{},{}L{},{}Z", num(-r), num(base), num(r * 0.5), num(-base), num(r * 0.5))
            }
            Shape::Diamond => format!("M0,{}L{},0L0,{}L{},0Z", num(-r), num(r), num(r), num(-r)),
            Shape::Cross => {
                // plus sign with arms of half-width r/3
                let (t, r) = (num(r / 3.0), num(r));
                let (nt, nr) = (format!("-{t}"), format!("-{r}"));
                format!("M{nt},{nr}H{t}V{nt}H{r}V{t}H{t}V{r}H{nt}V{t}H{nr}V{nt}H{nt}Z")
            }
        };
        Some(d)
    }
}

/// Screen offset applied to a group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

impl Translate {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Parse `translate(x,y)` as written by [`Translate::to_attr`].
    pub fn parse(attr: &str) -> Option<Self> {
        let inner = attr.trim().strip_prefix("translate(")?.strip_suffix(')')?;
        let mut parts = inner.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());
        let x = parts.next()?.parse().ok()?;
        let y = parts.next().map_or(Some(0.0), |p| p.parse().ok())?;
        Some(Self { x, y })
    }

    pub fn to_attr(&self) -> String {
        format!("translate({},{})", num(self.x), num(self.y))
    }
}

/// Format a pixel value rounded to three decimals, without trailing zeros.
pub fn num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { "0".to_string() } else { format!("{r}") }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
