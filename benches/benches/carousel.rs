// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use understory_carousel::{
    Carousel, CarouselHost, CarouselMode, CenterScaleConfig, ItemId, ItemState, LinearConfig,
    PanEvent, StackConfig, Transition,
};

/// A host that completes nothing and draws nothing.
#[derive(Default)]
struct NullHost {
    pending: Vec<Transition>,
}

impl CarouselHost for NullHost {
    fn bounds(&self) -> Size {
        Size::new(390.0, 844.0)
    }
    fn create_item(&mut self, _id: ItemId, _page: usize, _frame: Rect) {}
    fn render(&mut self, _id: ItemId, _page: usize) {}
    fn prepare_for_reuse(&mut self, _id: ItemId) {}
    fn destroy_item(&mut self, _id: ItemId) {}
    fn apply(&mut self, id: ItemId, state: &ItemState) {
        black_box((id, state));
    }
    fn fade_in(&mut self, _id: ItemId, _duration: f64) {}
    fn fade_out(&mut self, _id: ItemId, _below: Option<ItemId>, _duration: f64) {}
    fn animate(&mut self, transition: Transition) {
        self.pending.push(transition);
    }
}

fn modes() -> [(&'static str, CarouselMode); 3] {
    [
        ("linear", CarouselMode::Linear(LinearConfig::simple_unfilled().with_spacing(12.0))),
        ("center_scale", CarouselMode::CenterScale(CenterScaleConfig::simple())),
        ("stack", CarouselMode::Stack(StackConfig::simple())),
    ]
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/layout");

    for (name, mode) in modes() {
        group.bench_function(BenchmarkId::new("cold", name), |b| {
            b.iter_batched(
                || (Carousel::new(mode, 1_000, 500), NullHost::default()),
                |(mut carousel, mut host)| {
                    carousel.layout(&mut host);
                    black_box(carousel.visible_pages());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("warm", name), |b| {
            let mut host = NullHost::default();
            let mut carousel = Carousel::new(mode, 1_000, 500);
            carousel.layout(&mut host);
            b.iter(|| {
                carousel.layout(&mut host);
                host.pending.clear();
            });
        });
    }

    group.finish();
}

fn bench_stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/step");

    for (name, mode) in modes() {
        group.bench_function(name, |b| {
            let mut host = NullHost::default();
            let mut carousel = Carousel::new(mode, 1_000, 0);
            carousel.layout(&mut host);
            b.iter(|| {
                carousel.loop_next_page(&mut host);
                for transition in std::mem::take(&mut host.pending) {
                    carousel.complete_transition(transition.id, true, &mut host);
                }
                black_box(carousel.current_page());
            });
        });
    }

    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/drag");

    for (name, mode) in modes() {
        group.bench_function(name, |b| {
            let mut host = NullHost::default();
            let mut carousel = Carousel::new(mode, 1_000, 500);
            carousel.layout(&mut host);
            b.iter(|| {
                carousel.pan(PanEvent::began(), &mut host);
                for step in 1..=60 {
                    let x = -f64::from(step) * 8.0;
                    carousel.pan(PanEvent::changed(Vec2::new(x, 0.0)), &mut host);
                }
                carousel.pan(PanEvent::ended(Vec2::new(-480.0, 0.0)), &mut host);
                host.pending.clear();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout, bench_stepping, bench_drag);
criterion_main!(benches);
