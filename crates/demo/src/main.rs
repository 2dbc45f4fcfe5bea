// File: crates/demo/src/main.rs
// Summary: Demo loads an x,y,weight CSV and renders it as a weighted bubble chart to SVG.

use anyhow::{Context, Result};
use chart_core::{
    AxisConfig, AxisSpec, Chart, ChartConfig, ChartKind, Hue, Label, RawPoint, SeriesInput, Weight,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Accept path from CLI or fall back to sample filename (supports .csv/.cvs swap)
    let raw = std::env::args().nth(1).unwrap_or_else(|| "crates/demo/data/bubbles.csv".to_string());
    let config_path = std::env::args().nth(2);

    let (path, used_alt) = resolve_path(&raw)?;
    info!(path = %path.display(), used_alt, "using input file");

    let rows = load_xyw_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if rows.is_empty() {
        anyhow::bail!("no rows loaded, check headers/delimiter.");
    }
    info!(rows = rows.len(), "loaded rows");

    let mut config = match &config_path {
        Some(p) => ChartConfig::from_path(p).with_context(|| format!("reading chart config '{p}'"))?,
        None => ChartConfig::default(),
    };
    if config_path.is_none() {
        config.axis = axis_for(&rows);
    }

    let (w_min, w_max) = minmax(rows.iter().map(|r| r.2));
    let series = SeriesInput {
        label: Some(Label { display: path_stem(&path), is_hidden: false }),
        weight: Some(Weight { min: Some(w_min), max: Some(w_max), ..Weight::default() }),
        hue: Some(Hue { lower_shade: "#c2dcff".into(), upper_shade: "#0b5cb5".into() }),
        ..SeriesInput::new("bubbles")
            .with_values(rows.iter().map(|&(x, y, w)| RawPoint::weighted(x, y, w)).collect())
    };

    let mut chart = Chart::new(config).context("building chart")?;
    chart.load_content(ChartKind::Bubble, &series).context("loading bubble series")?;

    let out = out_name_with(&path, "bubbles");
    chart.render_to_svg(&out).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Axis limits padded 5% around the data.
fn axis_for(rows: &[(f64, f64, f64)]) -> AxisConfig {
    let pad = |(lo, hi): (f64, f64)| {
        let d = ((hi - lo) * 0.05).max(1e-9);
        (lo - d, hi + d)
    };
    let (x0, x1) = pad(minmax(rows.iter().map(|r| r.0)));
    let (y0, y1) = pad(minmax(rows.iter().map(|r| r.1)));
    AxisConfig { x: AxisSpec::new(x0, x1), y: AxisSpec::new(y0, y1), y2: None }
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn path_stem(p: &Path) -> String {
    p.file_stem().and_then(|s| s.to_str()).unwrap_or("data").to_string()
}

/// Produce output file name like target/out/chart_<stem>_<suffix>.svg
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = path_stem(input);
    let short = stem.split('_').take(3).collect::<Vec<_>>().join("_");
    let mut out = PathBuf::from("target/out");
    if short.is_empty() {
        out.push(format!("chart_{suffix}.svg"));
    } else {
        out.push(format!("chart_{short}_{suffix}.svg"));
    }
    out
}

/// Load `x,y,weight` rows. Rows with an unparseable x or y are skipped; a
/// missing weight counts as zero.
fn load_xyw_csv(path: &Path) -> Result<Vec<(f64, f64, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_x = idx(&["x", "time", "index"]).unwrap_or(0);
    let i_y = idx(&["y", "value"]).unwrap_or(1);
    let i_w = idx(&["weight", "w", "size"]);
    if i_w.is_none() {
        warn!("no weight column found, every bubble gets the same size");
    }

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: usize| rec.get(i).and_then(|s| s.parse::<f64>().ok());
        if let (Some(x), Some(y)) = (parse(i_x), parse(i_y)) {
            out.push((x, y, i_w.and_then(parse).unwrap_or(0.0)));
        }
    }
    Ok(out)
}

fn swap_ext(p: &Path) -> Option<std::path::PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

fn minmax(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for v in values {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    (min_v, max_v)
}
