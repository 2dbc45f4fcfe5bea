// File: crates/chart-core/src/interaction.rs
// Summary: Point selection state machine, click/reset flow, bubble blur, legend hover and
// legend-driven visibility toggling.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::regions;
use crate::scene::NodeId;
use crate::series::ResolvedPoint;
use crate::session::SessionState;
use crate::types::{
    BLUR_OPACITY, CLASS_BLUR, CLASS_HIGHLIGHT, CLASS_POINT, CLASS_POINT_MARK, CLASS_POINT_SELECTION,
    CLASS_REGION_GROUP, CLASS_SERIES_CONTAINER, CLASS_SERIES_LINE,
};

/// Identity of a point across renders: owning series plus original index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointId {
    pub key: String,
    pub index: usize,
}

impl PointId {
    pub fn new(key: impl Into<String>, index: usize) -> Self {
        Self { key: key.into(), index }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected,
}

/// Side table of point selection. The scene only mirrors it.
#[derive(Clone, Debug, Default)]
pub struct SelectionTable {
    states: HashMap<PointId, Selection>,
}

impl SelectionTable {
    pub fn get(&self, id: &PointId) -> Selection {
        self.states.get(id).copied().unwrap_or_default()
    }

    pub fn is_selected(&self, id: &PointId) -> bool {
        self.get(id) == Selection::Selected
    }

    /// Idle <-> Selected. Returns the new state.
    pub fn toggle(&mut self, id: &PointId) -> Selection {
        let next = match self.get(id) {
            Selection::Idle => Selection::Selected,
            Selection::Selected => Selection::Idle,
        };
        self.set(id, next);
        next
    }

    pub fn set(&mut self, id: &PointId, state: Selection) {
        match state {
            Selection::Idle => {
                self.states.remove(id);
            }
            Selection::Selected => {
                self.states.insert(id.clone(), state);
            }
        }
    }

    /// Drop every entry of `key`, or only those at `index >= from` when given.
    pub fn clear_series(&mut self, key: &str, from: Option<usize>) {
        self.states.retain(|id, _| id.key != key || from.is_some_and(|f| id.index < f));
    }

    pub fn selected(&self) -> impl Iterator<Item = &PointId> {
        self.states.iter().filter(|(_, s)| **s == Selection::Selected).map(|(id, _)| id)
    }
}

/// Everything a point's click listener needs, captured when the point is drawn.
#[derive(Clone)]
pub(crate) struct PointBinding {
    pub key: String,
    pub index: usize,
    pub point: ResolvedPoint,
    pub blur_on_select: bool,
}

/// Handed to click callbacks; clears the selection of the clicked point on demand.
#[derive(Clone)]
pub struct ResetHandle {
    state: Weak<RefCell<SessionState>>,
    point: PointId,
}

impl fmt::Debug for ResetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetHandle").field("point", &self.point).finish_non_exhaustive()
    }
}

impl ResetHandle {
    pub fn point(&self) -> &PointId {
        &self.point
    }

    /// Hide the selection overlay and undo any blur. No-op once the chart is gone.
    pub fn reset(&self) {
        let Some(state) = self.state.upgrade() else { return };
        let Ok(mut st) = state.try_borrow_mut() else {
            warn!(key = %self.point.key, index = self.point.index, "reset called while the chart is busy; ignored");
            return;
        };
        st.selection.set(&self.point, Selection::Idle);
        if let Some(group) = point_group(&st, &self.point) {
            project_selection(&mut st, group, false);
        }
        clear_blur(&mut st);
        st.blur_focus = None;
    }
}

/// Point group currently drawn for `id`, if any.
pub fn point_group(st: &SessionState, id: &PointId) -> Option<NodeId> {
    let container = st.scene.find_child(st.canvas, CLASS_SERIES_CONTAINER, Some(&id.key))?;
    let index = id.index.to_string();
    st.scene
        .select_all(container, CLASS_POINT)
        .into_iter()
        .find(|&g| st.scene.key(g) == Some(index.as_str()) && !st.scene.is_exiting(g))
}

/// Write the selection state of one point group into its attributes.
pub fn project_selection(st: &mut SessionState, group: NodeId, selected: bool) {
    let hidden = st.scene.attr(group, "aria-hidden") == Some("true");
    st.scene.set_attr(group, "aria-selected", selected);
    for overlay in st.scene.select_all(group, CLASS_POINT_SELECTION) {
        st.scene.set_attr(overlay, "aria-hidden", hidden || !selected);
    }
}

/// Click flow for one point. Runs with no session borrow held by the caller.
pub(crate) fn handle_point_click(state: &Rc<RefCell<SessionState>>, binding: &PointBinding, target: NodeId) {
    let Some(on_click) = binding.point.on_click.clone() else {
        return;
    };
    let id = PointId::new(binding.key.clone(), binding.index);
    {
        let mut st = state.borrow_mut();
        let selected = st.selection.toggle(&id) == Selection::Selected;
        project_selection(&mut st, target, selected);
        if binding.blur_on_select {
            if selected {
                blur_others(&mut st, target);
                st.blur_focus = Some(id.clone());
            } else {
                clear_blur(&mut st);
                st.blur_focus = None;
            }
        }
        debug!(key = %id.key, index = id.index, selected, "point clicked");
    }
    let reset = ResetHandle { state: Rc::downgrade(state), point: id };
    // consumer panics propagate to the caller
    on_click(reset, &binding.key, binding.index, &binding.point, target);
}

/// Dim every point mark except the one inside `selected`.
pub fn blur_others(st: &mut SessionState, selected: NodeId) {
    for mark in st.scene.select_all(st.canvas, CLASS_POINT_MARK) {
        let own = st.scene.parent(mark) == Some(selected);
        let opacity = if own { 1.0 } else { BLUR_OPACITY };
        st.scene.set_attr(mark, "fill-opacity", opacity);
        st.scene.set_attr(mark, "stroke-opacity", opacity);
    }
}

pub fn clear_blur(st: &mut SessionState) {
    for mark in st.scene.select_all(st.canvas, CLASS_POINT_MARK) {
        st.scene.remove_attr(mark, "fill-opacity");
        st.scene.remove_attr(mark, "stroke-opacity");
    }
}

/// Re-apply the blur of the focused point to marks drawn since it was
/// selected. Drops the focus once that point is gone or no longer selected.
pub fn refresh_blur(st: &mut SessionState) {
    let Some(focus) = st.blur_focus.clone() else { return };
    match point_group(st, &focus).filter(|_| st.selection.is_selected(&focus)) {
        Some(group) => blur_others(st, group),
        None => {
            clear_blur(st);
            st.blur_focus = None;
        }
    }
}

/// Legend hover: highlight `key`'s points, blur everyone else's.
pub fn highlight_series(st: &mut SessionState, key: &str) {
    for group in st.scene.select_all(st.canvas, CLASS_POINT) {
        let own = st.scene.attr(group, "aria-describedby") == Some(key);
        st.scene.set_class(group, CLASS_HIGHLIGHT, own);
        st.scene.set_class(group, CLASS_BLUR, !own);
    }
}

pub fn clear_highlight(st: &mut SessionState) {
    for group in st.scene.select_all(st.canvas, CLASS_POINT) {
        st.scene.remove_class(group, CLASS_HIGHLIGHT);
        st.scene.remove_class(group, CLASS_BLUR);
    }
}

/// Write visibility of series `key` into its container, points, overlays and connector.
pub fn project_visibility(st: &mut SessionState, key: &str) {
    let hidden = !st.shown.contains(key);
    let Some(container) = st.scene.find_child(st.canvas, CLASS_SERIES_CONTAINER, Some(key)) else {
        return;
    };
    st.scene.set_attr(container, "aria-hidden", hidden);
    for line in st.scene.select_all(container, CLASS_SERIES_LINE) {
        st.scene.set_attr(line, "aria-hidden", hidden);
    }
    for group in st.scene.select_all(container, CLASS_POINT) {
        st.scene.set_attr(group, "aria-hidden", hidden);
        let selected = st
            .scene
            .key(group)
            .and_then(|k| k.parse::<usize>().ok())
            .is_some_and(|index| st.selection.is_selected(&PointId::new(key, index)));
        project_selection(st, group, selected);
    }
    if let Some(item) = st.legend.item(key) {
        st.scene.set_attr(item, "aria-current", !hidden);
    }
    if let Some(regions) = st.scene.find_child(st.canvas, CLASS_REGION_GROUP, Some(key)) {
        if hidden {
            st.scene.set_attr(regions, "aria-hidden", true);
        }
    }
}

/// Legend click: flip visibility of `key` now, recompute region visibility after paint.
pub fn toggle_series(st: &mut SessionState, key: &str) -> bool {
    let visible = st.shown.toggle_visibility(key);
    project_visibility(st, key);
    st.scheduler.schedule_after_paint("region-visibility", regions::refresh_visibility);
    debug!(key, visible, "legend toggled series");
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_returns_to_idle() {
        let mut t = SelectionTable::default();
        let id = PointId::new("a", 2);
        assert_eq!(t.toggle(&id), Selection::Selected);
        assert!(t.is_selected(&id));
        assert_eq!(t.toggle(&id), Selection::Idle);
        assert_eq!(t.get(&id), Selection::Idle);
    }

    #[test]
    fn clear_series_can_keep_lower_indices() {
        let mut t = SelectionTable::default();
        for i in 0..4 {
            t.set(&PointId::new("a", i), Selection::Selected);
        }
        t.set(&PointId::new("b", 0), Selection::Selected);
        t.clear_series("a", Some(2));
        assert!(t.is_selected(&PointId::new("a", 1)));
        assert!(!t.is_selected(&PointId::new("a", 2)));
        assert!(t.is_selected(&PointId::new("b", 0)));
        t.clear_series("a", None);
        assert_eq!(t.selected().count(), 1);
    }
}
