// File: crates/chart-core/tests/interaction.rs
// Purpose: Selection toggling, reset handles, blur, legend hover/click and deferred region visibility.

use std::cell::RefCell;
use std::rc::Rc;

use chart_core::render;
use chart_core::types::{CLASS_BLUR, CLASS_HIGHLIGHT, CLASS_POINT, CLASS_POINT_MARK, CLASS_POINT_SELECTION};
use chart_core::{
    regions, ChartConfig, ChartSession, Label, NodeId, PointControl, RawPoint, RegionSpec, ResetHandle, Selection,
    SeriesInput,
};
use pretty_assertions::assert_eq;

fn session() -> ChartSession {
    ChartSession::new(ChartConfig::default()).expect("default config is valid")
}

fn labelled(key: &str) -> SeriesInput {
    SeriesInput {
        label: Some(Label { display: key.to_uppercase(), is_hidden: false }),
        ..SeriesInput::new(key).with_values(vec![RawPoint::new(1.0, Some(10.0)), RawPoint::new(4.0, Some(40.0))])
    }
}

fn groups(s: &ChartSession, key: &str) -> Vec<NodeId> {
    let st = s.state();
    render::container(&st, key).map(|c| st.scene.select_all(c, CLASS_POINT)).unwrap_or_default()
}

fn child(s: &ChartSession, group: NodeId, class: &str) -> NodeId {
    s.state().scene.select_all(group, class)[0]
}

fn attr(s: &ChartSession, node: NodeId, name: &str) -> Option<String> {
    s.state().scene.attr(node, name).map(str::to_string)
}

fn overlay_hidden(s: &ChartSession, group: NodeId) -> Option<String> {
    attr(s, child(s, group, CLASS_POINT_SELECTION), "aria-hidden")
}

#[test]
fn click_toggles_the_selection_overlay() {
    let s = session();
    let input = labelled("a").with_on_click(|_, _, _, _, _| {});
    PointControl::line(&s, &input).load().unwrap();
    let g = groups(&s, "a")[0];
    assert_eq!(overlay_hidden(&s, g).as_deref(), Some("true"));

    s.click(g);
    assert_eq!(overlay_hidden(&s, g).as_deref(), Some("false"));
    assert_eq!(attr(&s, g, "aria-selected").as_deref(), Some("true"));
    assert_eq!(s.selection("a", 0), Selection::Selected);

    s.click(g);
    assert_eq!(overlay_hidden(&s, g).as_deref(), Some("true"));
    assert_eq!(s.selection("a", 0), Selection::Idle);
}

#[test]
fn overlay_click_selects_its_point() {
    let s = session();
    let targets = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&targets);
    let input = labelled("a").with_on_click(move |_, _, _, _, target| sink.borrow_mut().push(target));
    PointControl::line(&s, &input).load().unwrap();
    let g = groups(&s, "a")[1];

    s.click(child(&s, g, CLASS_POINT_SELECTION));
    assert_eq!(*targets.borrow(), vec![g]);
    assert_eq!(s.selection("a", 1), Selection::Selected);
}

#[test]
fn click_without_handler_is_a_no_op() {
    let s = session();
    PointControl::line(&s, &labelled("a")).load().unwrap();
    let g = groups(&s, "a")[0];

    assert!(!s.click(g));
    assert_eq!(attr(&s, g, "aria-selected").as_deref(), Some("false"));
    assert_eq!(overlay_hidden(&s, g).as_deref(), Some("true"));
    assert_eq!(s.selection("a", 0), Selection::Idle);
}

#[test]
fn reset_handle_clears_selection_and_blur() {
    let s = session();
    let stash: Rc<RefCell<Option<ResetHandle>>> = Rc::default();
    let sink = Rc::clone(&stash);
    let input = labelled("a").with_on_click(move |reset, _, _, _, _| *sink.borrow_mut() = Some(reset));
    PointControl::bubble(&s, &input).load().unwrap();
    PointControl::bubble(&s, &labelled("b")).load().unwrap();
    let g = groups(&s, "a")[0];
    let other = child(&s, groups(&s, "b")[0], CLASS_POINT_MARK);

    s.click(g);
    assert_eq!(attr(&s, other, "fill-opacity").as_deref(), Some("0.2"));
    assert_eq!(attr(&s, child(&s, g, CLASS_POINT_MARK), "fill-opacity").as_deref(), Some("1"));

    let reset = stash.borrow_mut().take().expect("handler received a reset handle");
    assert_eq!(reset.point().index, 0);
    reset.reset();
    assert_eq!(overlay_hidden(&s, g).as_deref(), Some("true"));
    assert_eq!(s.selection("a", 0), Selection::Idle);
    assert_eq!(attr(&s, other, "fill-opacity"), None);
    assert_eq!(attr(&s, other, "stroke-opacity"), None);
}

#[test]
fn reset_from_inside_the_callback() {
    let s = session();
    let input = labelled("a").with_on_click(|reset, _, _, _, _| reset.reset());
    PointControl::line(&s, &input).load().unwrap();
    let g = groups(&s, "a")[0];

    s.click(g);
    assert_eq!(overlay_hidden(&s, g).as_deref(), Some("true"));
    assert_eq!(s.selection("a", 0), Selection::Idle);
}

#[test]
fn points_drawn_while_a_bubble_is_selected_are_blurred() {
    let s = session();
    let mut a = PointControl::bubble(&s, &labelled("a").with_on_click(|_, _, _, _, _| {}));
    a.load().unwrap();
    let g = groups(&s, "a")[0];
    s.click(g);

    PointControl::bubble(&s, &labelled("b")).load().unwrap();
    let late = child(&s, groups(&s, "b")[0], CLASS_POINT_MARK);
    assert_eq!(attr(&s, late, "fill-opacity").as_deref(), Some("0.2"));

    a.reflow(vec![RawPoint::new(1.0, Some(10.0)), RawPoint::new(4.0, Some(40.0)), RawPoint::new(6.0, Some(60.0))])
        .unwrap();
    let entered = child(&s, groups(&s, "a")[2], CLASS_POINT_MARK);
    assert_eq!(attr(&s, entered, "fill-opacity").as_deref(), Some("0.2"));
    assert_eq!(attr(&s, child(&s, g, CLASS_POINT_MARK), "fill-opacity").as_deref(), Some("1"));

    // deselecting lifts the blur everywhere, including late marks
    s.click(g);
    assert_eq!(attr(&s, late, "fill-opacity"), None);
    assert_eq!(attr(&s, entered, "fill-opacity"), None);
}

#[test]
fn line_points_do_not_blur_others() {
    let s = session();
    PointControl::line(&s, &labelled("a").with_on_click(|_, _, _, _, _| {})).load().unwrap();
    PointControl::line(&s, &labelled("b")).load().unwrap();
    s.click(groups(&s, "a")[0]);
    let other = child(&s, groups(&s, "b")[0], CLASS_POINT_MARK);
    assert_eq!(attr(&s, other, "fill-opacity"), None);
}

#[test]
fn two_legend_clicks_restore_visibility() {
    let s = session();
    PointControl::line(&s, &labelled("a")).load().unwrap();
    PointControl::line(&s, &labelled("b")).load().unwrap();
    let g = groups(&s, "a")[0];
    let item = s.state().legend.item("a").expect("legend item");
    assert_eq!(attr(&s, g, "aria-hidden").as_deref(), Some("false"));

    assert!(s.legend_click("a"));
    assert!(!s.is_shown("a"));
    assert_eq!(attr(&s, g, "aria-hidden").as_deref(), Some("true"));
    assert_eq!(overlay_hidden(&s, g).as_deref(), Some("true"));
    assert_eq!(attr(&s, item, "aria-current").as_deref(), Some("false"));

    assert!(s.legend_click("a"));
    assert!(s.is_shown("a"));
    assert_eq!(attr(&s, g, "aria-hidden").as_deref(), Some("false"));
    assert_eq!(attr(&s, item, "aria-current").as_deref(), Some("true"));
    assert_eq!(s.shown_targets().len(), 2);
}

#[test]
fn hidden_label_gets_no_legend_item() {
    let s = session();
    let input = SeriesInput { label: Some(Label { display: "A".into(), is_hidden: true }), ..labelled("a") };
    PointControl::line(&s, &input).load().unwrap();
    assert!(s.state().legend.item("a").is_none());
    assert!(!s.legend_click("a"));
}

#[test]
fn legend_hover_highlights_one_series() {
    let s = session();
    PointControl::line(&s, &labelled("a")).load().unwrap();
    PointControl::line(&s, &labelled("b")).load().unwrap();
    let (a, b) = (groups(&s, "a")[0], groups(&s, "b")[0]);

    s.legend_hover("a");
    {
        let st = s.state();
        assert!(st.scene.has_class(a, CLASS_HIGHLIGHT) && !st.scene.has_class(a, CLASS_BLUR));
        assert!(st.scene.has_class(b, CLASS_BLUR) && !st.scene.has_class(b, CLASS_HIGHLIGHT));
    }
    s.legend_leave("a");
    let st = s.state();
    for g in [a, b] {
        assert!(!st.scene.has_class(g, CLASS_HIGHLIGHT));
        assert!(!st.scene.has_class(g, CLASS_BLUR));
    }
}

fn with_region(key: &str, start: f64, end: f64) -> SeriesInput {
    SeriesInput {
        regions: vec![RegionSpec { start: Some(start), end: Some(end), ..RegionSpec::default() }],
        ..labelled(key)
    }
}

fn region_hidden(s: &ChartSession, key: &str) -> Option<String> {
    let st = s.state();
    regions::group(&st, key).and_then(|g| st.scene.attr(g, "aria-hidden").map(str::to_string))
}

#[test]
fn region_visibility_rule() {
    let s = session();
    PointControl::line(&s, &with_region("a", 10.0, 20.0)).load().unwrap();
    assert_eq!(region_hidden(&s, "a").as_deref(), Some("false"));

    PointControl::line(&s, &with_region("b", 30.0, 50.0)).load().unwrap();
    assert_eq!(region_hidden(&s, "a").as_deref(), Some("true"));
    assert_eq!(region_hidden(&s, "b").as_deref(), Some("true"));

    let same = session();
    PointControl::line(&same, &with_region("a", 10.0, 20.0)).load().unwrap();
    PointControl::line(&same, &with_region("b", 10.0, 20.0)).load().unwrap();
    assert_eq!(region_hidden(&same, "a").as_deref(), Some("false"));
    assert_eq!(region_hidden(&same, "b").as_deref(), Some("false"));
}

#[test]
fn legend_click_defers_region_recompute_to_the_next_frame() {
    let s = session();
    PointControl::line(&s, &with_region("a", 10.0, 20.0)).load().unwrap();
    PointControl::line(&s, &with_region("b", 30.0, 50.0)).load().unwrap();

    s.legend_click("b");
    // attribute writes are immediate, the region rule is not
    assert_eq!(region_hidden(&s, "b").as_deref(), Some("true"));
    assert_eq!(region_hidden(&s, "a").as_deref(), Some("true"));
    assert_eq!(s.state().scheduler.pending(), 1);

    assert_eq!(s.run_frame(), 1);
    assert_eq!(region_hidden(&s, "a").as_deref(), Some("false"));
    assert_eq!(region_hidden(&s, "b").as_deref(), Some("true"));
}

#[test]
fn reflow_of_a_hidden_single_series_shows_its_region_again() {
    let s = session();
    let mut a = PointControl::line(&s, &with_region("a", 10.0, 20.0));
    a.load().unwrap();
    s.legend_click("a");
    s.run_frame();
    assert!(!s.is_shown("a"));
    assert_eq!(region_hidden(&s, "a").as_deref(), Some("true"));

    a.reflow(vec![RawPoint::new(2.0, Some(15.0)), RawPoint::new(3.0, Some(18.0))]).unwrap();
    s.run_frame();
    assert!(s.is_shown("a"));
    assert_eq!(region_hidden(&s, "a").as_deref(), Some("false"));
}

#[test]
fn repeated_legend_clicks_queue_one_region_refresh() {
    let s = session();
    PointControl::line(&s, &with_region("a", 10.0, 20.0)).load().unwrap();
    s.legend_click("a");
    s.legend_click("a");
    s.legend_click("a");
    assert_eq!(s.state().scheduler.pending(), 1);
    assert_eq!(s.run_frame(), 1);
}

#[test]
fn malformed_region_fails_the_load() {
    let s = session();
    let bad = with_region("a", 50.0, 10.0);
    let err = PointControl::line(&s, &bad).load().err();
    assert!(matches!(err, Some(chart_core::ChartError::InvalidRegionBounds { index: 0, .. })));
    assert!(!s.is_shown("a"));
}
