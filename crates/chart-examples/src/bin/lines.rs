// File: crates/chart-examples/src/bin/lines.rs
// Summary: Minimal example that renders two line series from inline JSON to SVG.

use anyhow::Result;
use chart_core::{Chart, ChartKind, SeriesInput};

const CONFIG: &str = r#"{
    "axis": {
        "x": {"lowerLimit": 0, "upperLimit": 5},
        "y": {"lowerLimit": 0, "upperLimit": 2.2},
        "y2": {"lowerLimit": 0, "upperLimit": 100}
    },
    "dimension": {"width": 800, "height": 480},
    "settings": {"transition": {"duration": 250, "ease": "quadOut"}}
}"#;

const SERIES: [&str; 2] = [
    r##"{
        "key": "signal",
        "label": {"display": "Signal"},
        "shape": "circle",
        "values": [
            {"x": 0, "y": 0.0}, {"x": 1, "y": 1.2}, {"x": 2, "y": 0.8},
            {"x": 3, "y": null}, {"x": 4, "y": 1.4}, {"x": 5, "y": 2.0, "isCritical": true}
        ],
        "regions": [{"start": 1.0, "end": 1.5, "color": "#dde8f7"}]
    }"##,
    r##"{
        "key": "load",
        "label": {"display": "Load %"},
        "color": "#d9822b",
        "shape": "triangle",
        "yAxis": "y2",
        "values": [{"x": 0.5, "y": 40}, {"x": 2.5, "y": 65}, {"x": 4.5, "y": 55}]
    }"##,
];

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut chart = Chart::from_json(CONFIG)?;
    for json in SERIES {
        chart.load_content(ChartKind::Line, &SeriesInput::from_json(json)?)?;
    }

    let out = std::path::PathBuf::from("target/out/example_lines.svg");
    chart.render_to_svg(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}
