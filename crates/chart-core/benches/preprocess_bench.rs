use chart_core::resolve_palette;
use chart_core::{preprocess, AxisConfig, RawPoint, Series, SeriesInput};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_series(n: usize) -> Series {
    let values = (0..n).map(|i| RawPoint::weighted(i as f64 / n as f64 * 10.0, (i % 100) as f64, i as f64)).collect();
    Series::from_input(&SeriesInput::new("bench").with_values(values)).expect("valid series")
}

fn bench_preprocess(c: &mut Criterion) {
    let axis = AxisConfig::default();
    let mut group = c.benchmark_group("preprocess");
    for &n in &[1_000usize, 10_000usize] {
        let series = build_series(n);
        group.bench_function(format!("numeric_{n}"), |b| {
            b.iter(|| black_box(preprocess(&axis, black_box(&series)).expect("numeric x")));
        });
    }
    group.finish();

    let palette: Vec<String> = (0..9).map(|i| format!("#{i}{i}{i}")).collect();
    c.bench_function("resolve_palette", |b| {
        b.iter(|| {
            for count in 0..8 {
                black_box(resolve_palette(black_box(&palette), count));
            }
        })
    });
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
