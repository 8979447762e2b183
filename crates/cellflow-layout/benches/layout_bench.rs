use cellflow_core::geometry::Size;
use cellflow_layout::{Axis, Scalar, StyleSnapshot, Track, frac, resolve_fraction_unit};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn mixed_track(cells: usize) -> Track {
    let scalars: Vec<Scalar> = (0..cells)
        .map(|index| match index % 3 {
            0 => Scalar::cells(4),
            1 => Scalar::percent(10, Axis::Width),
            _ => Scalar::fraction(1 + (index % 4) as i64),
        })
        .collect();
    Track::new(scalars).gutter(1)
}

fn bench_track_resolve(c: &mut Criterion) {
    let size = Size::new(240, 80);
    for cells in [4usize, 16, 64] {
        let track = mixed_track(cells);
        c.bench_function(&format!("track_resolve_{cells}"), |b| {
            b.iter(|| track.resolve(black_box(240), size, size));
        });
    }
}

fn bench_track_shrink(c: &mut Criterion) {
    let size = Size::new(240, 80);
    let track = Track::new((0..32).map(|_| Scalar::cells(12)))
        .shrink(true)
        .minimums((0..32).map(|_| 4));
    c.bench_function("track_shrink_32", |b| {
        b.iter(|| track.resolve(black_box(240), size, size));
    });
}

fn bench_fraction_unit(c: &mut Criterion) {
    let size = Size::new(240, 80);
    let styles: Vec<StyleSnapshot> = (0..32)
        .map(|index| StyleSnapshot {
            width: Some(Scalar::fraction(1 + (index % 3) as i64)),
            min_width: (index % 4 == 0).then(|| Scalar::cells(10)),
            max_width: (index % 5 == 0).then(|| Scalar::cells(30)),
            ..Default::default()
        })
        .collect();
    c.bench_function("fraction_unit_32", |b| {
        b.iter(|| resolve_fraction_unit(&styles, size, size, black_box(frac(200)), Axis::Width));
    });
}

criterion_group!(
    benches,
    bench_track_resolve,
    bench_track_shrink,
    bench_fraction_unit
);
criterion_main!(benches);
