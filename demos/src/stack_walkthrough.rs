// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Steps and drags a circular stack carousel, logging the resulting layout.
//!
//! Run with `RUST_LOG=understory_carousel=trace` to see item lifecycle events.

mod headless;

use kurbo::{Size, Vec2};
use understory_carousel::{Baseline, Carousel, CarouselMode, ItemSize, PanEvent, StackConfig};

use headless::{HeadlessHost, init_tracing};

fn main() {
    init_tracing();

    let mut host = HeadlessHost::new(Size::new(390.0, 600.0));
    let config = StackConfig::simple()
        .with_size(ItemSize::Custom(Size::new(240.0, 360.0)))
        .with_baseline(Baseline::Center);
    let mut carousel = Carousel::new(CarouselMode::Stack(config), 7, 0);
    carousel.on_page_change(|old, new| tracing::info!(old, new, "page changed"));
    carousel.layout(&mut host);
    tracing::info!(pages = ?carousel.visible_pages(), "initial layout");
    host.dump(&carousel);

    for _ in 0..3 {
        carousel.loop_next_page(&mut host);
        host.settle(&mut carousel);
    }
    tracing::info!(current = carousel.current_page(), "after three steps");
    host.dump(&carousel);

    carousel.pan(PanEvent::began(), &mut host);
    for x in [-40.0, -90.0, -150.0, -70.0] {
        carousel.pan(PanEvent::changed(Vec2::new(x, 0.0)), &mut host);
    }
    carousel.pan(PanEvent::ended(Vec2::new(-70.0, 0.0)), &mut host);
    host.settle(&mut carousel);
    tracing::info!(current = carousel.current_page(), "after drag");
    host.dump(&carousel);

    host.resize(Size::new(600.0, 600.0));
    carousel.layout(&mut host);
    tracing::info!(reusable = carousel.reusable_count(), "after resize");
    host.dump(&carousel);
}
