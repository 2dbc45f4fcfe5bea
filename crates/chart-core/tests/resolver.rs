// File: crates/chart-core/tests/resolver.rs
// Purpose: Radius and color decisions, rendered bubble geometry and the radius monotonicity law.

use chart_core::preprocess::resolve_series;
use chart_core::render;
use chart_core::resolver::{color, radius, shade_colors};
use chart_core::types::{CLASS_POINT, CLASS_POINT_MARK, DEFAULT_BUBBLE_RADIUS_MAX, DEFAULT_BUBBLE_RADIUS_MIN};
use chart_core::{AxisConfig, ChartConfig, ChartSession, Hue, PointControl, RawPoint, Series, SeriesInput, Weight};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn weighted(weights: &[f64], weight: Option<Weight>) -> Series {
    let values = weights.iter().enumerate().map(|(i, w)| RawPoint::weighted(i as f64, i as f64 * 10.0, *w)).collect();
    let input = SeriesInput { weight, ..SeriesInput::new("w").with_values(values) };
    let mut series = Series::from_input(&input).expect("valid series");
    resolve_series(&AxisConfig::default(), &mut series).expect("numeric x");
    series
}

fn ranged(min: f64, max: f64) -> Option<Weight> {
    Some(Weight { min: Some(min), max: Some(max), ..Weight::default() })
}

#[test]
fn weight_range_maps_onto_pixel_bounds() {
    let s = weighted(&[0.0, 10.0], ranged(0.0, 10.0));
    let r: Vec<f64> = s.internal_values_subset.iter().map(|p| radius(&s, p)).collect();
    assert_eq!(r, vec![DEFAULT_BUBBLE_RADIUS_MIN, DEFAULT_BUBBLE_RADIUS_MAX]);
}

#[test]
fn rendered_bubbles_use_the_bounds() {
    let session = ChartSession::new(ChartConfig::default()).unwrap();
    let input = SeriesInput {
        weight: ranged(0.0, 10.0),
        ..SeriesInput::new("b").with_values(vec![RawPoint::weighted(1.0, 10.0, 0.0), RawPoint::weighted(2.0, 20.0, 10.0)])
    };
    PointControl::bubble(&session, &input).load().unwrap();

    let st = session.state();
    let container = render::container(&st, "b").unwrap();
    let radii: Vec<&str> = st
        .scene
        .select_all(container, CLASS_POINT)
        .into_iter()
        .map(|g| st.scene.select_all(g, CLASS_POINT_MARK)[0])
        .map(|mark| st.scene.attr(mark, "r").unwrap())
        .collect();
    assert_eq!(radii, vec!["3", "30"]);
}

#[test]
fn radius_fallbacks() {
    let none = weighted(&[5.0], None);
    assert_eq!(radius(&none, &none.internal_values_subset[0]), DEFAULT_BUBBLE_RADIUS_MAX);

    let fixed = weighted(&[5.0], Some(Weight { fixed: Some(12.0), ..Weight::default() }));
    assert_eq!(radius(&fixed, &fixed.internal_values_subset[0]), 12.0);

    // a fixed radius wins over a weight range
    let both = weighted(&[5.0], Some(Weight { min: Some(0.0), max: Some(10.0), fixed: Some(7.0), max_radius: None }));
    assert_eq!(radius(&both, &both.internal_values_subset[0]), 7.0);

    // a max radius is an override too, with or without a weight range
    let capped = weighted(&[0.0, 10.0], Some(Weight { max_radius: Some(20.0), ..ranged(0.0, 10.0).unwrap() }));
    let radii: Vec<f64> = capped.internal_values_subset.iter().map(|p| radius(&capped, p)).collect();
    assert_eq!(radii, vec![20.0, 20.0]);

    let max_only = weighted(&[0.0, 10.0], Some(Weight { max_radius: Some(20.0), ..Weight::default() }));
    let radii: Vec<f64> = max_only.internal_values_subset.iter().map(|p| radius(&max_only, p)).collect();
    assert_eq!(radii, vec![20.0, 20.0]);
}

#[test]
fn degenerate_weight_range_does_not_panic() {
    let s = weighted(&[4.0, 4.0], ranged(4.0, 4.0));
    for p in &s.internal_values_subset {
        assert_eq!(radius(&s, p), DEFAULT_BUBBLE_RADIUS_MIN);
    }
}

#[test]
fn hue_follows_radius_or_y() {
    let hue = Some(Hue { lower_shade: "#000000".into(), upper_shade: "#ffffff".into() });

    let mut by_weight = weighted(&[0.0, 10.0], ranged(0.0, 10.0));
    by_weight.hue = hue.clone();
    let colors: Vec<String> = by_weight.internal_values_subset.iter().map(|p| color(&by_weight, p)).collect();
    assert_eq!(colors, vec!["rgb(0, 0, 0)", "rgb(255, 255, 255)"]);

    let mut by_y = weighted(&[1.0, 1.0, 1.0], None);
    by_y.hue = hue;
    let colors: Vec<String> = by_y.internal_values_subset.iter().map(|p| color(&by_y, p)).collect();
    assert_eq!(colors, vec!["rgb(0, 0, 0)", "rgb(128, 128, 128)", "rgb(255, 255, 255)"]);

    let flat = weighted(&[1.0], None);
    assert_eq!(color(&flat, &flat.internal_values_subset[0]), flat.color);
}

#[test]
fn shade_colors_stay_index_aligned() {
    let values = vec![
        RawPoint::new(1.0, Some(1.0)),
        RawPoint::new(2.0, None),
        RawPoint::new(3.0, Some(3.0)),
    ];
    let palette: Vec<String> = ["#111111", "#222222", "#333333", "#444444", "#555555"].map(String::from).to_vec();
    let input = SeriesInput { palette: Some(palette.clone()), ..SeriesInput::new("s").with_values(values) };
    let mut series = Series::from_input(&input).unwrap();
    resolve_series(&AxisConfig::default(), &mut series).unwrap();

    let shades = shade_colors(&series);
    assert_eq!(shades.len(), 3);
    // two drawn points take the palette extremes
    assert_eq!(shades[0], "#111111");
    assert_eq!(shades[1], series.color);
    assert_eq!(shades[2], "#555555");
    assert_eq!(series.palette, Some(palette));
}

proptest! {
    #[test]
    fn radius_is_monotonic_in_weight(
        lo in -1_000.0f64..1_000.0,
        span in 0.001f64..1_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let hi = lo + span;
        let (wa, wb) = (lo + a * span, lo + b * span);
        let s = weighted(&[wa, wb], ranged(lo, hi));
        let (ra, rb) = (radius(&s, &s.internal_values_subset[0]), radius(&s, &s.internal_values_subset[1]));
        if wa < wb {
            prop_assert!(ra <= rb);
        } else if wb < wa {
            prop_assert!(rb <= ra);
        }
        prop_assert!(ra >= DEFAULT_BUBBLE_RADIUS_MIN - 1e-9 && ra <= DEFAULT_BUBBLE_RADIUS_MAX + 1e-9);
    }
}
