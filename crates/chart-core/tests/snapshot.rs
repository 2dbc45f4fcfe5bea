// File: crates/chart-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic small chart to SVG text.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares the markup line by line.
// - Else, logs a note and returns (skips) without failing to ease first run.

use chart_core::{Chart, ChartConfig, ChartKind, Label, RawPoint, RegionSpec, SeriesInput};
use pretty_assertions::assert_eq;

fn render_svg() -> String {
    let mut chart = Chart::new(ChartConfig::default()).expect("default config");
    let line = SeriesInput {
        label: Some(Label { display: "Line".into(), is_hidden: false }),
        regions: vec![RegionSpec { start: Some(20.0), end: Some(40.0), ..RegionSpec::default() }],
        ..SeriesInput::new("line").with_values(vec![
            RawPoint::new(0.0, Some(10.0)),
            RawPoint::new(2.5, Some(60.0)),
            RawPoint::new(5.0, None),
            RawPoint::new(7.5, Some(35.0)),
        ])
    };
    let bubbles = SeriesInput::new("bubbles")
        .with_values(vec![RawPoint::weighted(3.0, 50.0, 1.0), RawPoint::weighted(6.0, 80.0, 4.0)]);
    chart.load_content(ChartKind::Line, &line).expect("line loads");
    chart.load_content(ChartKind::Bubble, &bubbles).expect("bubbles load");
    chart.session().run_frame();
    chart.to_svg()
}

#[test]
fn golden_basic_chart() {
    let svg = render_svg();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("basic_chart.svg");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &svg).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), svg.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read_to_string(&snap_path).expect("read snapshot");
        let got: Vec<&str> = svg.lines().collect();
        let want: Vec<&str> = want.lines().collect();
        assert_eq!(got, want, "rendered markup differs from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
        // Skip without failing on first run
    }
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(render_svg(), render_svg());
}

#[test]
fn markup_carries_the_attribute_contract() {
    let svg = render_svg();
    for needle in [
        r#"class="series-container""#,
        r#"class="points-group""#,
        r#"aria-describedby="line""#,
        r#"aria-disabled="true""#,
        r#"aria-selected="false""#,
        r#"class="region-group""#,
        r#"class="series-line""#,
        r#"clip-path="url(#chart-clip)""#,
    ] {
        assert!(svg.contains(needle), "missing {needle}");
    }
}
