// File: crates/chart-examples/src/bin/timeline.rs
// Summary: Timeline example: one track per series on a date axis, hashed marks for tentative events.

use anyhow::Result;
use chart_core::{Chart, ChartKind, SeriesInput};

const CONFIG: &str = r#"{
    "axis": {
        "x": {"type": "timeseries", "lowerLimit": "2024-01-01", "upperLimit": "2024-06-30"},
        "y": {"lowerLimit": 0, "upperLimit": 1}
    },
    "dimension": {"width": 900, "height": 260},
    "clickPassThrough": {"timeline": true},
    "timeline": {"trackHeight": 48}
}"#;

const SERIES: [&str; 2] = [
    r#"{
        "key": "releases",
        "label": {"display": "Releases"},
        "shape": "diamond",
        "values": [
            {"x": "2024-01-15", "y": 1},
            {"x": "2024-03-01", "y": 1},
            {"x": "2024-05-20", "y": 1, "style": "hashed"}
        ]
    }"#,
    r##"{
        "key": "incidents",
        "label": {"display": "Incidents"},
        "color": "#db3737",
        "shape": "cross",
        "values": [
            {"x": "2024-02-03T08:30:00Z", "y": 1, "isCritical": true},
            {"x": "2024-04-11T17:00:00Z", "y": 1}
        ]
    }"##,
];

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut chart = Chart::from_json(CONFIG)?;
    for json in SERIES {
        chart.load_content(ChartKind::Timeline, &SeriesInput::from_json(json)?)?;
    }
    // a wider canvas only moves marks along x
    chart.resize(1200.0, 260.0)?;

    let out = std::path::PathBuf::from("target/out/example_timeline.svg");
    chart.render_to_svg(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}
