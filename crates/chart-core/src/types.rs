// File: crates/chart-core/src/types.rs
// Summary: Shared constants (radii, colors, class names, ids) and padding insets.

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels.
pub const WIDTH: f64 = 1024.0;
/// Default canvas height in pixels.
pub const HEIGHT: f64 = 640.0;

/// Fallback series color when none is supplied.
pub const DEFAULT_COLOR: &str = "#1070ca";

/// Pixel bounds used by weighted bubbles.
pub const DEFAULT_BUBBLE_RADIUS_MIN: f64 = 3.0;
pub const DEFAULT_BUBBLE_RADIUS_MAX: f64 = 30.0;

/// Radius of plain shape marks (line and timeline points).
pub const DEFAULT_POINT_RADIUS: f64 = 4.0;

/// Selection overlays are this much larger than their primary mark.
pub const SELECTED_MARK_SCALE: f64 = 1.6;

/// Opacity applied to every non-selected bubble while one is selected.
pub const BLUR_OPACITY: f64 = 0.2;

/// Default single-series shade palette, lightest to darkest.
pub const DEFAULT_SHADE_PALETTE: [&str; 5] = ["#edf6ff", "#c2dcff", "#8bb9ff", "#4a90e2", "#0b5cb5"];

/// Height of one timeline track in pixels.
pub const DEFAULT_TRACK_HEIGHT: f64 = 40.0;

/// Id of the single shared hatch pattern.
pub const HASHED_PATTERN_ID: &str = "hashed-pattern";

// Scene class names that make up the observable structure.
pub const CLASS_CANVAS: &str = "chart-canvas";
pub const CLASS_SERIES_CONTAINER: &str = "series-container";
pub const CLASS_POINTS_GROUP: &str = "points-group";
pub const CLASS_POINT: &str = "point";
pub const CLASS_POINT_MARK: &str = "point-mark";
pub const CLASS_POINT_SELECTION: &str = "point-selection";
pub const CLASS_SERIES_LINE: &str = "series-line";
pub const CLASS_REGION_GROUP: &str = "region-group";
pub const CLASS_REGION: &str = "region";
pub const CLASS_LEGEND: &str = "legend";
pub const CLASS_LEGEND_ITEM: &str = "legend-item";
pub const CLASS_HIGHLIGHT: &str = "highlight";
pub const CLASS_BLUR: &str = "blur";

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    /// Create new insets; negative inputs are clamped to zero.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72.0, 24.0, 24.0, 56.0)
    }
}
