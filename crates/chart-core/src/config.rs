// File: crates/chart-core/src/config.rs
// Summary: Chart-level configuration (JSON), transition settings and click pass-through flags.

use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::axis::AxisConfig;
use crate::error::{ChartError, Result};
use crate::types::{Insets, DEFAULT_TRACK_HEIGHT, HEIGHT, WIDTH};

/// Chart families that share the point reconciler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bubble,
    ShadedBubble,
    Timeline,
}

impl ChartKind {
    pub const fn name(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bubble => "bubble",
            ChartKind::ShadedBubble => "shaded-bubble",
            ChartKind::Timeline => "timeline",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimension {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT }
    }
}

/// Easing curve attached to scene transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    Linear,
    #[default]
    CubicInOut,
    QuadOut,
}

impl Ease {
    pub const fn name(&self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::CubicInOut => "cubic-in-out",
            Ease::QuadOut => "quad-out",
        }
    }
}

/// A resolved transition ready to be attached to scene nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub ease: Ease,
}

impl Transition {
    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }
}

/// Computes a transition duration in milliseconds at render time.
pub type DurationFn = Rc<dyn Fn() -> f64>;

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionConfig {
    /// Duration in milliseconds.
    pub duration: f64,
    pub ease: Ease,
    /// Overrides `duration` when set.
    #[serde(skip)]
    pub duration_fn: Option<DurationFn>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { duration: 0.0, ease: Ease::default(), duration_fn: None }
    }
}

impl fmt::Debug for TransitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionConfig")
            .field("duration", &self.duration)
            .field("ease", &self.ease)
            .field("duration_fn", &self.duration_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl TransitionConfig {
    pub fn with_duration_fn(mut self, f: impl Fn() -> f64 + 'static) -> Self {
        self.duration_fn = Some(Rc::new(f));
        self
    }

    /// Evaluate the duration. The value must be finite and non-negative.
    pub fn resolve(&self) -> Result<Transition> {
        let ms = match &self.duration_fn {
            Some(f) => f(),
            None => self.duration,
        };
        if !ms.is_finite() || ms < 0.0 {
            return Err(ChartError::InvalidTransitionDuration(ms));
        }
        let duration = Duration::try_from_secs_f64(ms / 1000.0)
            .map_err(|_| ChartError::InvalidTransitionDuration(ms))?;
        Ok(Transition { duration, ease: self.ease })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub transition: TransitionConfig,
}

/// Per chart kind: let clicks fall through marks that have no handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickPassThrough {
    pub line: bool,
    pub bubble: bool,
    pub timeline: bool,
}

impl ClickPassThrough {
    pub const fn for_kind(&self, kind: ChartKind) -> bool {
        match kind {
            ChartKind::Line => self.line,
            ChartKind::Bubble | ChartKind::ShadedBubble => self.bubble,
            ChartKind::Timeline => self.timeline,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineSettings {
    pub track_height: f64,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self { track_height: DEFAULT_TRACK_HEIGHT }
    }
}

fn default_clip_path_id() -> String {
    "chart-clip".to_string()
}

/// Everything a chart session needs to know about its canvas.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default)]
    pub axis: AxisConfig,
    #[serde(default)]
    pub dimension: Dimension,
    #[serde(default)]
    pub padding: Insets,
    #[serde(default = "default_clip_path_id")]
    pub clip_path_id: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub click_pass_through: ClickPassThrough,
    #[serde(default)]
    pub timeline: TimelineSettings,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            axis: AxisConfig::default(),
            dimension: Dimension::default(),
            padding: Insets::default(),
            clip_path_id: default_clip_path_id(),
            settings: Settings::default(),
            click_pass_through: ClickPassThrough::default(),
            timeline: TimelineSettings::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: ChartConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Axis limits must match their axis types and the transition must resolve.
    pub fn validate(&self) -> Result<()> {
        self.axis.x.domain("x")?;
        self.axis.y.domain("y")?;
        if let Some(y2) = &self.axis.y2 {
            y2.domain("y2")?;
        }
        self.settings.transition.resolve()?;
        Ok(())
    }

    /// Plot area (canvas minus padding), never negative.
    pub fn plot_size(&self) -> (f64, f64) {
        (
            (self.dimension.width - self.padding.hsum()).max(0.0),
            (self.dimension.height - self.padding.vsum()).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_uses_defaults() {
        let cfg = ChartConfig::from_json(r#"{"axis":{"x":{"lowerLimit":0,"upperLimit":5},"y":{"lowerLimit":0,"upperLimit":1}}}"#).unwrap();
        assert_eq!(cfg.dimension, Dimension::default());
        assert_eq!(cfg.clip_path_id, "chart-clip");
        assert!(!cfg.click_pass_through.bubble);
        assert!(cfg.settings.transition.resolve().unwrap().is_instant());
    }

    #[test]
    fn mismatched_axis_limits_are_rejected() {
        let err = ChartConfig::from_json(r#"{"axis":{"x":{"type":"timeseries","lowerLimit":0,"upperLimit":5},"y":{"lowerLimit":0,"upperLimit":1}}}"#);
        assert!(matches!(err, Err(ChartError::InvalidFormatType { .. })));
    }

    #[test]
    fn duration_fn_must_return_a_usable_number() {
        let t = TransitionConfig::default().with_duration_fn(|| f64::NAN);
        assert!(matches!(t.resolve(), Err(ChartError::InvalidTransitionDuration(_))));
        let t = TransitionConfig::default().with_duration_fn(|| 250.0);
        assert_eq!(t.resolve().unwrap().duration, Duration::from_millis(250));
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let err = ChartConfig::from_json(r#"{"settings":{"transition":{"duration":1e300}}}"#);
        assert!(matches!(err, Err(ChartError::InvalidTransitionDuration(_))));
    }
}
