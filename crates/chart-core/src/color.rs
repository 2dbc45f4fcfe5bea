// File: crates/chart-core/src/color.rs
// Summary: Minimal RGB color parsing, formatting and linear interpolation for hue gradients.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let v = |i: usize, w: usize| u8::from_str_radix(hex.get(i..i + w)?, 16).ok();
            return match hex.len() {
                3 => Some(Self::new(v(0, 1)? * 17, v(1, 1)? * 17, v(2, 1)? * 17)),
                6 => Some(Self::new(v(0, 2)?, v(2, 2)?, v(4, 2)?)),
                _ => None,
            };
        }
        let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut it = inner.split(',').map(|p| p.trim().parse::<f64>().ok().map(|c| c.round().clamp(0.0, 255.0) as u8));
        let c = Self::new(it.next()??, it.next()??, it.next()??);
        if it.next().is_some() { None } else { Some(c) }
    }

    /// Channel-wise interpolation; `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Interpolate between two CSS colors. Unparseable endpoints fall back to
/// the nearer endpoint's text.
pub fn interpolate(lower: &str, upper: &str, t: f64) -> String {
    match (Rgb::parse(lower), Rgb::parse(upper)) {
        (Some(a), Some(b)) => a.lerp(&b, t).to_string(),
        _ if t < 0.5 => lower.to_string(),
        _ => upper.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_forms() {
        assert_eq!(Rgb::parse("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse("#1070ca"), Some(Rgb::new(16, 112, 202)));
        assert_eq!(Rgb::parse("rgb(1, 2, 3)"), Some(Rgb::new(1, 2, 3)));
        assert_eq!(Rgb::parse("teal"), None);
    }

    #[test]
    fn interpolates_endpoints_and_midpoint() {
        assert_eq!(interpolate("#000000", "#ffffff", 0.0), "rgb(0, 0, 0)");
        assert_eq!(interpolate("#000000", "#ffffff", 1.0), "rgb(255, 255, 255)");
        assert_eq!(interpolate("#000000", "#cccccc", 0.5), "rgb(102, 102, 102)");
    }
}
