use chart_core::{ChartConfig, ChartSession, PointControl, RawPoint, SeriesInput};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn series_input(key: &str, n: usize) -> SeriesInput {
    let values = (0..n)
        .map(|i| {
            let x = i as f64 / n as f64 * 10.0;
            let y = if i % 17 == 0 { None } else { Some(50.0 + (i as f64 * 0.05).sin() * 40.0) };
            RawPoint::new(x, y)
        })
        .collect();
    SeriesInput::new(key).with_values(values).with_on_click(|_, _, _, _, _| {})
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for &n in &[200usize, 2_000usize] {
        group.bench_function(format!("load_{n}"), |b| {
            let input = series_input("a", n);
            b.iter(|| {
                let session = ChartSession::new(ChartConfig::default()).expect("config");
                let mut ctl = PointControl::line(&session, &input);
                ctl.load().expect("load");
                black_box(session.state().scene.len());
            });
        });
        group.bench_function(format!("resize_{n}"), |b| {
            let session = ChartSession::new(ChartConfig::default()).expect("config");
            let mut ctl = PointControl::bubble(&session, &series_input("a", n));
            ctl.load().expect("load");
            let mut wide = false;
            b.iter(|| {
                wide = !wide;
                session.set_size(if wide { 1400.0 } else { 1024.0 }, 640.0).expect("size");
                ctl.resize().expect("resize");
            });
        });
        group.bench_function(format!("reflow_{n}"), |b| {
            let session = ChartSession::new(ChartConfig::default()).expect("config");
            let input = series_input("a", n);
            let shorter = input.values[..n / 2].to_vec();
            let mut ctl = PointControl::line(&session, &input);
            ctl.load().expect("load");
            let mut half = false;
            b.iter(|| {
                half = !half;
                let values = if half { shorter.clone() } else { input.values.clone() };
                ctl.reflow(values).expect("reflow");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
