// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pages through a linear carousel, then switches it to centered scaling.

mod headless;

use kurbo::{Size, Vec2};
use understory_carousel::{
    Carousel, CarouselMode, CenterScaleConfig, ItemSize, LinearConfig, PanEvent,
};

use headless::{HeadlessHost, init_tracing};

fn main() {
    init_tracing();

    let mut host = HeadlessHost::new(Size::new(390.0, 600.0));
    let linear = LinearConfig::simple_unfilled()
        .with_size(ItemSize::Custom(Size::new(300.0, 480.0)))
        .with_spacing(16.0);
    let mut carousel = Carousel::new(CarouselMode::Linear(linear), 20, 0);
    carousel.on_page_change(|old, new| tracing::info!(old, new, "page changed"));
    carousel.on_change_scroll(|progress| tracing::trace!(progress, "scrolling"));
    carousel.layout(&mut host);
    tracing::info!(
        extent = ?carousel.content_extent(Size::new(390.0, 600.0)),
        pages = ?carousel.visible_pages(),
        "initial layout"
    );

    carousel.pan(PanEvent::began(), &mut host);
    for x in (1..=12).map(|i| -f64::from(i) * 20.0) {
        carousel.pan(PanEvent::changed(Vec2::new(x, 0.0)), &mut host);
    }
    carousel.pan(PanEvent::ended(Vec2::new(-240.0, 0.0)), &mut host);
    host.settle(&mut carousel);
    tracing::info!(
        current = carousel.current_page(),
        offset = ?carousel.scroll_offset(),
        "after drag"
    );

    carousel.loop_previous_page(&mut host);
    host.settle(&mut carousel);
    tracing::info!(current = carousel.current_page(), "wrapped backwards");

    let center = CenterScaleConfig::simple()
        .with_size(ItemSize::Custom(Size::new(240.0, 400.0)))
        .with_spacing(8.0);
    carousel.set_mode(CarouselMode::CenterScale(center), &mut host);
    host.settle(&mut carousel);
    tracing::info!(current = carousel.current_page(), "switched to center scale");
    host.dump(&carousel);

    host.resize(Size::new(844.0, 390.0));
    carousel.layout(&mut host);
    tracing::info!(offset = ?carousel.scroll_offset(), "after rotation to landscape");
    host.dump(&carousel);
}
