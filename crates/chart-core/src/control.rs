// File: crates/chart-core/src/control.rs
// Summary: Per-series lifecycle controller (load / unload / resize / redraw / reflow).
// Notes:
// - Every operation validates before touching the session; a failed call leaves
//   shown targets, legend and scene exactly as they were.
// - An unloaded control is spent: every later call fails with `ControlUnloaded`.

use tracing::debug;

use crate::config::{ChartKind, Transition};
use crate::error::{ChartError, Result};
use crate::interaction;
use crate::preprocess::resolve_series;
use crate::regions;
use crate::render;
use crate::series::{RawPoint, Series, SeriesInput};
use crate::session::{ChartSession, SessionState};
use crate::strategy::{BubbleStrategy, LineStrategy, PointStrategy, ShadedBubbleStrategy, TimelineStrategy};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Constructed,
    Loaded,
    Unloaded,
}

/// Lifecycle contract shared by every chart control; object safe.
pub trait ChartControl {
    fn key(&self) -> Option<&str>;
    fn kind(&self) -> ChartKind;
    fn lifecycle(&self) -> LifecycleState;
    fn load(&mut self) -> Result<()>;
    fn unload(&mut self) -> Result<()>;
    fn resize(&mut self) -> Result<()>;
    fn redraw(&mut self) -> Result<()>;
    fn reflow(&mut self, values: Vec<RawPoint>) -> Result<()>;
}

/// One series drawn into a shared [`ChartSession`] with strategy `S`.
pub struct PointControl<S> {
    session: ChartSession,
    strategy: S,
    /// Private copy of the consumer input.
    input: SeriesInput,
    series: Option<Series>,
    state: LifecycleState,
}

pub type LineControl = PointControl<LineStrategy>;
pub type BubbleControl = PointControl<BubbleStrategy>;
pub type ShadedBubbleControl = PointControl<ShadedBubbleStrategy>;
pub type TimelineControl = PointControl<TimelineStrategy>;

impl PointControl<LineStrategy> {
    pub fn line(session: &ChartSession, input: &SeriesInput) -> Self {
        Self::new(session, LineStrategy, input)
    }
}

impl PointControl<BubbleStrategy> {
    pub fn bubble(session: &ChartSession, input: &SeriesInput) -> Self {
        Self::new(session, BubbleStrategy, input)
    }
}

impl PointControl<ShadedBubbleStrategy> {
    pub fn shaded_bubble(session: &ChartSession, input: &SeriesInput) -> Self {
        Self::new(session, ShadedBubbleStrategy, input)
    }
}

impl PointControl<TimelineStrategy> {
    pub fn timeline(session: &ChartSession, input: &SeriesInput) -> Self {
        Self::new(session, TimelineStrategy, input)
    }
}

impl<S: PointStrategy> PointControl<S> {
    pub fn new(session: &ChartSession, strategy: S, input: &SeriesInput) -> Self {
        Self {
            session: session.clone(),
            strategy,
            input: input.clone(),
            series: None,
            state: LifecycleState::Constructed,
        }
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state
    }

    /// The loaded series, `None` before `load` and after `unload`.
    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn key(&self) -> Option<&str> {
        self.series.as_ref().map(|s| s.key.as_str()).or(self.input.key.as_deref())
    }

    fn name(&self) -> String {
        self.key().unwrap_or_default().to_string()
    }

    fn ensure_usable(&self) -> Result<()> {
        match self.state {
            LifecycleState::Unloaded => Err(ChartError::ControlUnloaded(self.name())),
            _ => Ok(()),
        }
    }

    fn loaded_series(&self) -> Result<&Series> {
        self.ensure_usable()?;
        self.series.as_ref().ok_or_else(|| ChartError::ControlNotLoaded(self.name()))
    }

    fn transition(&self) -> Result<Transition> {
        self.session.state().config.settings.transition.resolve()
    }

    fn registers_label_shape(&self) -> bool {
        matches!(self.strategy.kind(), ChartKind::Line | ChartKind::Timeline)
    }

    /// Validate, preprocess and draw the series. Loading again re-runs the
    /// whole pipeline in place.
    pub fn load(&mut self) -> Result<&mut Self> {
        self.ensure_usable()?;
        let transition = self.transition()?;
        let mut series = Series::from_input(&self.input)?;
        {
            let st = self.session.state();
            let reloading = self.series.as_ref().is_some_and(|s| s.key == series.key);
            if !reloading && st.loaded.contains(&series.key) {
                return Err(ChartError::DuplicateKey(series.key));
            }
            resolve_series(&st.config.axis, &mut series)?;
        }

        let weak = self.session.downgrade();
        let mut guard = self.session.state_mut();
        let st: &mut SessionState = &mut guard;
        st.loaded.insert(series.key.clone());
        st.shown.register(&series.key);
        self.strategy.attach(st, &series);
        let drawn = render::draw_points(st, &weak, &self.strategy, &series, transition);
        regions::create(st, &series);
        regions::refresh_visibility(st);
        let shown = st.shown.contains(&series.key);
        st.legend.register(&mut st.scene, weak, &series, shown);
        if self.registers_label_shape() {
            st.labels.register(series.y_axis, &series.key, series.shape, &series.color);
        }
        drop(guard);

        debug!(key = %series.key, kind = self.strategy.kind().name(), points = drawn, "series loaded");
        self.series = Some(series);
        self.state = LifecycleState::Loaded;
        Ok(self)
    }

    /// Remove every node of this series and release its shared registrations.
    pub fn unload(&mut self) -> Result<&mut Self> {
        self.ensure_usable()?;
        if let Some(series) = self.series.take() {
            let mut guard = self.session.state_mut();
            let st: &mut SessionState = &mut guard;
            render::remove_series(st, &series.key);
            regions::remove(st, &series.key);
            st.legend.deregister(&mut st.scene, &series.key);
            st.labels.deregister(&series.key);
            st.shown.remove(&series.key);
            st.selection.clear_series(&series.key, None);
            st.loaded.shift_remove(&series.key);
            self.strategy.detach(st, &series.key);
            regions::refresh_visibility(st);
            interaction::refresh_blur(st);
            debug!(key = %series.key, "series unloaded");
        }
        // keep the key so later errors can still name the control
        self.input = SeriesInput { key: self.input.key.take(), ..SeriesInput::default() };
        self.state = LifecycleState::Unloaded;
        Ok(self)
    }

    /// Move existing nodes to the current scale. Creates nothing.
    pub fn resize(&mut self) -> Result<&mut Self> {
        let series = self.loaded_series()?;
        let mut guard = self.session.state_mut();
        let st: &mut SessionState = &mut guard;
        let moved = render::reposition(st, &self.strategy, series);
        regions::reposition(st, series);
        regions::refresh_visibility(st);
        debug!(key = %series.key, moved, "series resized");
        drop(guard);
        Ok(self)
    }

    /// Throw away this series' tree and draw it from scratch.
    pub fn redraw(&mut self) -> Result<&mut Self> {
        let transition = self.transition()?;
        let series = self.loaded_series()?;
        let weak = self.session.downgrade();
        let mut guard = self.session.state_mut();
        let st: &mut SessionState = &mut guard;
        render::remove_series(st, &series.key);
        let drawn = render::draw_points(st, &weak, &self.strategy, series, transition);
        regions::create(st, series);
        regions::refresh_visibility(st);
        debug!(key = %series.key, points = drawn, "series redrawn");
        drop(guard);
        Ok(self)
    }

    /// Replace the values and reconcile the points layer only.
    pub fn reflow(&mut self, values: Vec<RawPoint>) -> Result<&mut Self> {
        let transition = self.transition()?;
        let current = self.loaded_series()?;
        if values.is_empty() {
            return Err(ChartError::NoValuesProvided(current.key.clone()));
        }
        let mut next = current.clone();
        next.values = values;
        resolve_series(&self.session.state().config.axis, &mut next)?;

        let weak = self.session.downgrade();
        let mut guard = self.session.state_mut();
        let st: &mut SessionState = &mut guard;
        st.shown.remove(&next.key);
        st.shown.register(&next.key);
        st.selection.clear_series(&next.key, Some(next.values.len()));
        let shown = st.shown.contains(&next.key);
        st.legend.register(&mut st.scene, weak.clone(), &next, shown);
        let drawn = render::draw_points(st, &weak, &self.strategy, &next, transition);
        // reflow may have made a hidden series visible again
        regions::refresh_visibility(st);
        drop(guard);

        debug!(key = %next.key, points = drawn, "series reflowed");
        self.input.values = next.values.clone();
        self.series = Some(next);
        Ok(self)
    }
}

impl<S: PointStrategy> ChartControl for PointControl<S> {
    fn key(&self) -> Option<&str> {
        PointControl::key(self)
    }

    fn kind(&self) -> ChartKind {
        self.strategy.kind()
    }

    fn lifecycle(&self) -> LifecycleState {
        self.state
    }

    fn load(&mut self) -> Result<()> {
        PointControl::load(self).map(|_| ())
    }

    fn unload(&mut self) -> Result<()> {
        PointControl::unload(self).map(|_| ())
    }

    fn resize(&mut self) -> Result<()> {
        PointControl::resize(self).map(|_| ())
    }

    fn redraw(&mut self) -> Result<()> {
        PointControl::redraw(self).map(|_| ())
    }

    fn reflow(&mut self, values: Vec<RawPoint>) -> Result<()> {
        PointControl::reflow(self, values).map(|_| ())
    }
}
