// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the public API for building and driving SVG charts.

pub mod axis;
pub mod chart;
pub mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod legend;
pub mod preprocess;
pub mod reconcile;
pub mod regions;
pub mod render;
pub mod resolver;
pub mod scale;
pub mod scene;
pub mod scheduler;
pub mod series;
pub mod session;
pub mod strategy;
pub mod types;

pub use axis::{AxisConfig, AxisId, AxisSpec, AxisType, RawX, XValue};
pub use chart::Chart;
pub use config::{ChartConfig, ChartKind, Ease, Transition, TransitionConfig};
pub use control::{
    BubbleControl, ChartControl, LifecycleState, LineControl, PointControl, ShadedBubbleControl, TimelineControl,
};
pub use error::{ChartError, Result};
pub use geometry::Shape;
pub use interaction::{PointId, ResetHandle, Selection};
pub use preprocess::preprocess;
pub use resolver::resolve_palette;
pub use scale::{ChartScale, ScaleProvider};
pub use scene::{EventKind, NodeId, Scene};
pub use series::{FillStyle, Hue, Label, RawPoint, RegionSpec, ResolvedPoint, Series, SeriesInput, Weight};
pub use session::{ChartSession, ShownTargets};
