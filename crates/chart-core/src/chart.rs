// File: crates/chart-core/src/chart.rs
// Summary: Chart struct owning one session and its series controls, plus SVG output.

use std::path::Path;

use tracing::{debug, info};

use crate::config::{ChartConfig, ChartKind};
use crate::control::{ChartControl, PointControl};
use crate::error::Result;
use crate::series::{RawPoint, SeriesInput};
use crate::session::ChartSession;

/// Thin owner of a [`ChartSession`] and the controls drawn into it.
pub struct Chart {
    session: ChartSession,
    controls: Vec<Box<dyn ChartControl>>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Result<Self> {
        Ok(Self { session: ChartSession::new(config)?, controls: Vec::new() })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(ChartConfig::from_json(json)?)
    }

    pub fn session(&self) -> &ChartSession {
        &self.session
    }

    /// Build and load a control of `kind` for `input`. Nothing is kept when loading fails.
    pub fn load_content(&mut self, kind: ChartKind, input: &SeriesInput) -> Result<&mut Self> {
        let mut control: Box<dyn ChartControl> = match kind {
            ChartKind::Line => Box::new(PointControl::line(&self.session, input)),
            ChartKind::Bubble => Box::new(PointControl::bubble(&self.session, input)),
            ChartKind::ShadedBubble => Box::new(PointControl::shaded_bubble(&self.session, input)),
            ChartKind::Timeline => Box::new(PointControl::timeline(&self.session, input)),
        };
        control.load()?;
        self.controls.push(control);
        Ok(self)
    }

    /// Unload and forget the control of `key`. Returns `false` when no such control exists.
    pub fn unload_content(&mut self, key: &str) -> Result<bool> {
        let Some(pos) = self.controls.iter().position(|c| c.key() == Some(key)) else {
            return Ok(false);
        };
        let mut control = self.controls.remove(pos);
        control.unload()?;
        Ok(true)
    }

    pub fn reflow(&mut self, key: &str, values: Vec<RawPoint>) -> Result<bool> {
        match self.controls.iter_mut().find(|c| c.key() == Some(key)) {
            Some(control) => {
                control.reflow(values)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Resize the canvas and move every control's nodes.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.session.set_size(width, height)?;
        for control in &mut self.controls {
            control.resize()?;
        }
        Ok(())
    }

    pub fn redraw(&mut self) -> Result<()> {
        for control in &mut self.controls {
            control.redraw()?;
        }
        debug!(controls = self.controls.len(), "chart redrawn");
        Ok(())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.controls.iter().filter_map(|c| c.key()).collect()
    }

    pub fn control(&self, key: &str) -> Option<&dyn ChartControl> {
        self.controls.iter().find(|c| c.key() == Some(key)).map(|c| c.as_ref())
    }

    pub fn to_svg(&self) -> String {
        self.session.to_svg()
    }

    /// Settle pending work and write the chart as an SVG file.
    pub fn render_to_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        self.session.run_frame();
        self.session.state().scene.write_svg(path.as_ref())?;
        info!(path = %path.as_ref().display(), "chart written");
        Ok(())
    }
}
