// File: crates/chart-core/src/regions.rs
// Summary: Value bands drawn behind a series, plus the shared region visibility rule.

use tracing::trace;

use crate::geometry::{clamp, num};
use crate::scale::ScaleProvider;
use crate::scene::NodeId;
use crate::series::{RegionSpec, Series};
use crate::session::SessionState;
use crate::types::{CLASS_REGION, CLASS_REGION_GROUP};

/// Pixel rectangle of one band inside the plot: `(x, y, width, height)`.
fn band(st: &SessionState, series: &Series, region: &RegionSpec) -> (f64, f64, f64, f64) {
    let (w, h) = st.config.plot_size();
    let axis = region.axis.unwrap_or(series.y_axis);
    let top = region.end.map_or(0.0, |v| st.scale.y_for(axis, v));
    let bottom = region.start.map_or(h, |v| st.scale.y_for(axis, v));
    let (top, bottom) = (clamp(top.min(bottom), 0.0, h), clamp(top.max(bottom), 0.0, h));
    (0.0, top, w, bottom - top)
}

fn write_band(st: &mut SessionState, rect: NodeId, (x, y, w, h): (f64, f64, f64, f64)) {
    st.scene.set_attr(rect, "x", num(x));
    st.scene.set_attr(rect, "y", num(y));
    st.scene.set_attr(rect, "width", num(w));
    st.scene.set_attr(rect, "height", num(h));
}

pub fn group(st: &SessionState, key: &str) -> Option<NodeId> {
    st.scene.find_child(st.canvas, CLASS_REGION_GROUP, Some(key))
}

/// Draw the regions of `series`, replacing any drawn before. Groups go behind
/// every series container. Returns `None` when the series has no regions.
pub fn create(st: &mut SessionState, series: &Series) -> Option<NodeId> {
    if series.regions.is_empty() {
        remove(st, &series.key);
        return None;
    }
    let g = match group(st, &series.key) {
        Some(g) => {
            st.scene.clear_children(g);
            g
        }
        None => {
            let g = st.scene.prepend(st.canvas, "g");
            st.scene.add_class(g, CLASS_REGION_GROUP);
            st.scene.set_key(g, series.key.clone());
            g
        }
    };
    st.scene.set_attr(g, "transform", st.origin().to_attr());
    st.scene.set_attr(g, "aria-describedby", &series.key);
    st.scene.set_attr(g, "aria-hidden", !st.shown.contains(&series.key));
    for region in &series.regions {
        let rect = st.scene.append(g, "rect");
        st.scene.add_class(rect, CLASS_REGION);
        let color = region.color.as_deref().unwrap_or(&series.color).to_string();
        st.scene.set_attr(rect, "fill", color);
        let b = band(st, series, region);
        write_band(st, rect, b);
    }
    trace!(key = %series.key, regions = series.regions.len(), "regions drawn");
    Some(g)
}

/// Move the bands of `series` to the current scale without recreating them.
pub fn reposition(st: &mut SessionState, series: &Series) {
    let Some(g) = group(st, &series.key) else { return };
    st.scene.set_attr(g, "transform", st.origin().to_attr());
    let rects = st.scene.children(g).to_vec();
    for (rect, region) in rects.into_iter().zip(&series.regions) {
        let b = band(st, series, region);
        write_band(st, rect, b);
    }
}

pub fn remove(st: &mut SessionState, key: &str) -> bool {
    match group(st, key) {
        Some(g) => {
            st.scene.remove(g);
            true
        }
        None => false,
    }
}

/// Apply the region visibility rule to every region group of the chart.
///
/// A hidden series never shows its regions. Among shown series, a single one
/// shows its regions; two or more hide theirs unless every group draws
/// exactly the same bands.
pub fn refresh_visibility(st: &mut SessionState) {
    let groups = st.scene.select_all(st.canvas, CLASS_REGION_GROUP);
    let mut shown = Vec::new();
    for g in groups {
        let visible = st.scene.key(g).is_some_and(|k| st.shown.contains(k));
        if visible {
            shown.push(g);
        } else {
            st.scene.set_attr(g, "aria-hidden", true);
        }
    }
    let footprints: Vec<Vec<[Option<String>; 4]>> = shown.iter().map(|&g| footprint(st, g)).collect();
    let identical = footprints.windows(2).all(|w| w[0] == w[1]);
    let hide = shown.len() > 1 && !identical;
    for &g in &shown {
        st.scene.set_attr(g, "aria-hidden", hide);
    }
    trace!(shown = shown.len(), hide, "region visibility refreshed");
}

fn footprint(st: &SessionState, g: NodeId) -> Vec<[Option<String>; 4]> {
    st.scene
        .children(g)
        .iter()
        .map(|&r| ["x", "y", "width", "height"].map(|a| st.scene.attr(r, a).map(str::to_string)))
        .collect()
}
