// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A host that keeps item frames in memory and logs every call.

use std::collections::BTreeMap;

use kurbo::{Rect, Size};
use understory_carousel::{Carousel, CarouselHost, ItemId, ItemState, Transition};

/// What the host knows about one item view.
#[derive(Clone, Debug, Default)]
pub(crate) struct View {
    pub(crate) page: Option<usize>,
    pub(crate) frame: Rect,
    pub(crate) scale: f64,
    pub(crate) z_index: isize,
}

/// An in-memory [`CarouselHost`] that finishes animations on request.
#[derive(Debug)]
pub(crate) struct HeadlessHost {
    bounds: Size,
    views: BTreeMap<ItemId, View>,
    pending: Vec<Transition>,
}

impl HeadlessHost {
    pub(crate) fn new(bounds: Size) -> Self {
        Self {
            bounds,
            views: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    pub(crate) fn resize(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    /// Reports every pending animation as finished, including ones their
    /// completions start.
    pub(crate) fn settle(&mut self, carousel: &mut Carousel) {
        while !self.pending.is_empty() {
            for transition in std::mem::take(&mut self.pending) {
                carousel.complete_transition(transition.id, true, self);
            }
        }
    }

    /// Logs the views bound to a page, back to front.
    pub(crate) fn dump(&self, carousel: &Carousel) {
        for id in carousel.draw_order() {
            let Some(view) = self.views.get(&id) else {
                continue;
            };
            tracing::info!(
                item = id.get(),
                page = ?view.page,
                x = view.frame.x0,
                y = view.frame.y0,
                width = view.frame.width(),
                scale = view.scale,
                z = view.z_index,
                "view"
            );
        }
    }
}

impl CarouselHost for HeadlessHost {
    fn bounds(&self) -> Size {
        self.bounds
    }

    fn create_item(&mut self, id: ItemId, page: usize, frame: Rect) {
        tracing::debug!(item = id.get(), page, "create");
        self.views.insert(
            id,
            View {
                page: Some(page),
                frame,
                scale: 1.0,
                z_index: 0,
            },
        );
    }

    fn render(&mut self, id: ItemId, page: usize) {
        tracing::debug!(item = id.get(), page, "render");
        if let Some(view) = self.views.get_mut(&id) {
            view.page = Some(page);
        }
    }

    fn prepare_for_reuse(&mut self, id: ItemId) {
        if let Some(view) = self.views.get_mut(&id) {
            *view = View::default();
        }
    }

    fn destroy_item(&mut self, id: ItemId) {
        tracing::debug!(item = id.get(), "destroy");
        self.views.remove(&id);
    }

    fn apply(&mut self, id: ItemId, state: &ItemState) {
        if let Some(view) = self.views.get_mut(&id) {
            view.frame = state.frame;
            view.scale = state.animated_scale;
            view.z_index = state.z_index;
        }
    }

    fn fade_in(&mut self, id: ItemId, duration: f64) {
        tracing::trace!(item = id.get(), duration, "fade in");
    }

    fn fade_out(&mut self, id: ItemId, below: Option<ItemId>, duration: f64) {
        tracing::trace!(item = id.get(), below = ?below.map(ItemId::get), duration, "fade out");
    }

    fn animate(&mut self, transition: Transition) {
        tracing::debug!(id = transition.id.get(), target = ?transition.target, "animate");
        self.pending.push(transition);
    }
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub(crate) fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,understory_carousel=debug".into()),
        )
        .init();
}
