use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use weighted_sokoban::config::{Limits, Method, METHODS};
use weighted_sokoban::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_two_boxes(c: &mut Criterion) {
    // weights 3 and 1, open room
    bench_level(c, &METHODS, "levels/two-boxes.txt", 20);
}

#[allow(unused)]
fn bench_walled_perimeter(c: &mut Criterion) {
    // one heavy box, lots of space to wander around
    bench_level(c, &[Method::Ucs, Method::AStar], "levels/walled-perimeter.txt", 50);
}

fn bench_level(c: &mut Criterion, methods: &[Method], level_path: &str, samples: usize) {
    let level = level_path.load_level().unwrap();

    let mut group = c.benchmark_group(level_path);
    group.sample_size(samples);
    for &method in methods {
        group.bench_with_input(BenchmarkId::from_parameter(method), &method, |b, &method| {
            b.iter(|| {
                criterion::black_box(
                    level.solve(criterion::black_box(method), Limits::unlimited()),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_two_boxes,
    bench_walled_perimeter,
);
criterion_main!(benches);
