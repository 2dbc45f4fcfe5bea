// File: crates/chart-core/src/render.rs
// Summary: Shared point renderer: series container, points group, keyed point groups with
// selection overlays, optional line connector, and in-place repositioning.
// Notes:
// - Tree shape: g.series-container[key] > g.points-group > g.point[index] > (overlay, mark).
// - Null points are filtered before the join; their index is never reused.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::config::Transition;
use crate::geometry::{num, Translate};
use crate::interaction::{self, PointBinding, PointId};
use crate::reconcile::join_keyed;
use crate::scene::{EventKind, Listener, NodeId};
use crate::series::Series;
use crate::session::SessionState;
use crate::strategy::{MarkSpec, PointStrategy};
use crate::types::{
    CLASS_POINT, CLASS_POINTS_GROUP, CLASS_POINT_MARK, CLASS_POINT_SELECTION, CLASS_SERIES_CONTAINER,
    CLASS_SERIES_LINE, SELECTED_MARK_SCALE,
};

const CLASS_CRITICAL: &str = "critical";

pub fn container(st: &SessionState, key: &str) -> Option<NodeId> {
    st.scene.find_child(st.canvas, CLASS_SERIES_CONTAINER, Some(key))
}

/// Container group of `series`, created on first use.
pub fn ensure_container(st: &mut SessionState, series: &Series) -> NodeId {
    let node = match container(st, &series.key) {
        Some(c) => c,
        None => {
            let c = st.scene.append(st.canvas, "g");
            st.scene.add_class(c, CLASS_SERIES_CONTAINER);
            st.scene.set_key(c, series.key.clone());
            st.scene.set_attr(c, "data-key", &series.key);
            c
        }
    };
    st.scene.set_attr(node, "aria-hidden", !st.shown.contains(&series.key));
    node
}

fn ensure_points_group(st: &mut SessionState, container: NodeId) -> NodeId {
    let group = match st.scene.find_child(container, CLASS_POINTS_GROUP, None) {
        Some(g) => g,
        None => {
            let g = st.scene.append(container, "g");
            st.scene.add_class(g, CLASS_POINTS_GROUP);
            g
        }
    };
    st.scene.set_attr(group, "transform", st.origin().to_attr());
    st.scene.set_attr(group, "clip-path", format!("url(#{})", st.config.clip_path_id));
    group
}

pub fn points_group(st: &SessionState, key: &str) -> Option<NodeId> {
    let c = container(st, key)?;
    st.scene.find_child(c, CLASS_POINTS_GROUP, None)
}

/// Reconcile the point groups of `series` against its resolved points.
/// Returns the number of drawn points.
pub fn draw_points(
    st: &mut SessionState,
    session: &Weak<RefCell<SessionState>>,
    strategy: &dyn PointStrategy,
    series: &Series,
    transition: Transition,
) -> usize {
    let container = ensure_container(st, series);
    let group = ensure_points_group(st, container);
    let marks = strategy.marks(series);
    let rendered: Vec<_> = series.rendered_points().collect();
    let keys: Vec<String> = rendered.iter().map(|(i, _)| i.to_string()).collect();

    let join = join_keyed(&mut st.scene, group, CLASS_POINT, "g", &keys);
    join.exit_with(&mut st.scene, transition);
    for &(_, node) in &join.enter {
        st.scene.set_transition(node, transition);
    }

    let hidden = !st.shown.contains(&series.key);
    let pass_through = st.config.click_pass_through.for_kind(strategy.kind());
    for (slot, node) in join.merged() {
        let (index, point) = rendered[slot];
        if let Some((x, y)) = strategy.position(st, series, point) {
            st.scene.set_attr(node, "transform", Translate::new(x, y).to_attr());
        }
        let interactive = point.on_click.is_some();
        let selected = st.selection.is_selected(&PointId::new(series.key.as_str(), index));
        st.scene.set_attr(node, "aria-describedby", &series.key);
        st.scene.set_attr(node, "data-index", index);
        st.scene.set_attr(node, "aria-hidden", hidden);
        st.scene.set_attr(node, "aria-disabled", !interactive);
        st.scene.set_attr(node, "aria-selected", selected);
        st.scene.set_attr(node, "pointer-events", if pass_through && !interactive { "none" } else { "auto" });
        st.scene.set_class(node, CLASS_CRITICAL, point.is_critical);

        let spec = &marks[index];
        let overlay = upsert_mark(st, node, CLASS_POINT_SELECTION, spec, spec.radius * SELECTED_MARK_SCALE);
        st.scene.set_attr(overlay, "fill", "none");
        st.scene.set_attr(overlay, "stroke", spec.stroke.as_deref().unwrap_or(&spec.fill));
        st.scene.set_attr(overlay, "stroke-width", 2);
        st.scene.set_attr(overlay, "aria-hidden", hidden || !selected);
        let mark = upsert_mark(st, node, CLASS_POINT_MARK, spec, spec.radius);
        paint(st, mark, spec);

        if interactive {
            let binding = PointBinding {
                key: series.key.clone(),
                index,
                point: point.clone(),
                blur_on_select: strategy.blur_on_select(),
            };
            let listener = click_listener(session.clone(), binding, node);
            st.scene.on(node, EventKind::Click, Rc::clone(&listener));
            st.scene.on(overlay, EventKind::Click, listener);
        } else {
            st.scene.off(node, EventKind::Click);
            st.scene.off(overlay, EventKind::Click);
        }
    }

    if strategy.draws_connector() {
        draw_connector(st, strategy, series, group);
    }
    interaction::refresh_blur(st);
    trace!(
        key = %series.key,
        enter = join.enter.len(),
        update = join.update.len(),
        exit = join.exit.len(),
        "points reconciled"
    );
    rendered.len()
}

fn click_listener(session: Weak<RefCell<SessionState>>, binding: PointBinding, group: NodeId) -> Listener {
    Rc::new(move |_| {
        if let Some(state) = session.upgrade() {
            interaction::handle_point_click(&state, &binding, group);
        }
    })
}

/// Create or update the `class` child of `group` so it draws `spec` at `radius`.
/// Overlays stay first so the mark paints above them.
fn upsert_mark(st: &mut SessionState, group: NodeId, class: &str, spec: &MarkSpec, radius: f64) -> NodeId {
    let tag = spec.shape.tag();
    let node = match st.scene.find_child(group, class, None) {
        Some(n) if st.scene.node(n).is_some_and(|node| node.tag() == tag) => n,
        stale => {
            if let Some(n) = stale {
                st.scene.remove(n);
            }
            let n = if class == CLASS_POINT_SELECTION {
                st.scene.prepend(group, tag)
            } else {
                st.scene.append(group, tag)
            };
            st.scene.add_class(n, class);
            n
        }
    };
    match spec.shape.path(radius) {
        Some(d) => st.scene.set_attr(node, "d", d),
        None => st.scene.set_attr(node, "r", num(radius)),
    }
    node
}

fn paint(st: &mut SessionState, mark: NodeId, spec: &MarkSpec) {
    if spec.hashed {
        let pattern = st.ensure_hashed_pattern();
        st.scene.set_attr(mark, "fill", format!("url(#{pattern})"));
        st.scene.set_attr(mark, "color", &spec.fill);
    } else {
        st.scene.set_attr(mark, "fill", &spec.fill);
        st.scene.remove_attr(mark, "color");
    }
    match &spec.stroke {
        Some(stroke) => st.scene.set_attr(mark, "stroke", stroke),
        None => st.scene.remove_attr(mark, "stroke"),
    }
}

/// Path through every drawn point; a null point lifts the pen.
fn connector_path(st: &SessionState, strategy: &dyn PointStrategy, series: &Series) -> String {
    let mut d = String::new();
    let mut pen_down = false;
    for point in &series.internal_values_subset {
        match strategy.position(st, series, point) {
            Some((x, y)) => {
                let cmd = if pen_down { 'L' } else { 'M' };
                let _ = write!(d, "{cmd}{},{}", num(x), num(y));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    d
}

fn draw_connector(st: &mut SessionState, strategy: &dyn PointStrategy, series: &Series, group: NodeId) {
    let line = match st.scene.find_child(group, CLASS_SERIES_LINE, None) {
        Some(l) => l,
        None => {
            let l = st.scene.prepend(group, "path");
            st.scene.add_class(l, CLASS_SERIES_LINE);
            l
        }
    };
    let d = connector_path(st, strategy, series);
    st.scene.set_attr(line, "d", d);
    st.scene.set_attr(line, "fill", "none");
    st.scene.set_attr(line, "stroke", &series.color);
    st.scene.set_attr(line, "aria-describedby", &series.key);
    st.scene.set_attr(line, "aria-hidden", !st.shown.contains(&series.key));
}

/// Re-apply translate attributes of existing nodes for the current scale.
/// Nothing is created or removed.
pub fn reposition(st: &mut SessionState, strategy: &dyn PointStrategy, series: &Series) -> usize {
    let Some(group) = points_group(st, &series.key) else { return 0 };
    st.scene.set_attr(group, "transform", st.origin().to_attr());
    let mut moved = 0;
    for node in st.scene.children(group).to_vec() {
        if !st.scene.has_class(node, CLASS_POINT) || st.scene.is_exiting(node) {
            continue;
        }
        let Some(point) = st
            .scene
            .key(node)
            .and_then(|k| k.parse::<usize>().ok())
            .and_then(|i| series.internal_values_subset.get(i))
        else {
            continue;
        };
        if let Some((x, y)) = strategy.position(st, series, point) {
            st.scene.set_attr(node, "transform", Translate::new(x, y).to_attr());
            moved += 1;
        }
    }
    if let Some(line) = st.scene.find_child(group, CLASS_SERIES_LINE, None) {
        let d = connector_path(st, strategy, series);
        st.scene.set_attr(line, "d", d);
    }
    moved
}

/// Drop the whole tree of `key` right away.
pub fn remove_series(st: &mut SessionState, key: &str) -> bool {
    match container(st, key) {
        Some(c) => {
            st.scene.remove(c);
            true
        }
        None => false,
    }
}
