// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_carousel::{Ring, RotateDirection};

fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring/rotate");

    for count in [3usize, 9, 100, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("next", count), &count, |b, &count| {
            let mut ring = Ring::new(count, 0);
            b.iter(|| {
                ring.rotate(RotateDirection::Next, 1);
                black_box(ring.current());
            });
        });
        group.bench_with_input(BenchmarkId::new("previous_by_3", count), &count, |b, &count| {
            let mut ring = Ring::new(count, 0);
            b.iter(|| {
                ring.rotate(RotateDirection::Previous, 3);
                black_box(ring.current());
            });
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring/queries");
    let ring = Ring::new(1_000, 500);

    group.bench_function("level_and_location", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for page in ring.slots() {
                acc += ring.level(page);
                black_box(ring.location(page));
            }
            black_box(acc)
        });
    });

    group.bench_function("un_center_iterate", |b| {
        b.iter(|| {
            let mut visited = 0usize;
            ring.un_center_iterate(|left, right| {
                visited += usize::from(left.is_some()) + usize::from(right.is_some());
                true
            });
            black_box(visited)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rotate, bench_queries);
criterion_main!(benches);
