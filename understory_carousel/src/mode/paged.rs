// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal paging engine for the flat and centered-scale modes.
//!
//! The engine owns a scroll offset in content coordinates. Every offset change
//! runs the same pipeline: derive the current page and progress, report the
//! progress, lay out the visible window, apply scales, and report a page
//! change if the page moved.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::config::{CenterScaleConfig, LinearConfig};
use crate::drag::{PanEvent, PanPhase};
use crate::geometry::{PagedGeometry, Side, level_scale, triangular_scale};
use crate::host::{
    CarouselHost, ItemTarget, SCROLL_DURATION, SETTLE_DURATION, Transition, TransitionId,
    TransitionTarget,
};
use crate::item::ItemId;
use crate::observer::Observers;
use crate::recycler::Recycler;
use crate::transition::{Channel, Transitions};

use super::animate_items;

/// Scales closer than this are considered reconciled.
const SCALE_EPSILON: f64 = 1e-9;

/// How a paged engine scales its items.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum PagedStyle {
    /// Every item at full scale.
    Flat,
    /// Items shrink with their distance from the viewport center.
    CenterScale { scale_step: f64 },
}

/// What to do when a transition settles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Then {
    /// Snap applied scales to their discrete values.
    Settle,
}

/// Paging engine state.
#[derive(Debug)]
pub(crate) struct PagedPager {
    geometry: PagedGeometry,
    style: PagedStyle,
    count: usize,
    current: usize,
    scroll_offset: f64,
    drag_origin: Option<f64>,
    recycler: Recycler,
    transitions: Transitions<Then>,
    observers: Observers,
}

impl PagedPager {
    pub(crate) fn linear(
        config: &LinearConfig,
        count: usize,
        current: usize,
        observers: Observers,
        next_transition: u64,
    ) -> Self {
        Self::new(
            PagedGeometry::from(config),
            PagedStyle::Flat,
            count,
            current,
            observers,
            next_transition,
        )
    }

    pub(crate) fn center_scale(
        config: &CenterScaleConfig,
        count: usize,
        current: usize,
        observers: Observers,
        next_transition: u64,
    ) -> Self {
        Self::new(
            PagedGeometry::from(config),
            PagedStyle::CenterScale {
                scale_step: config.scale_step,
            },
            count,
            current,
            observers,
            next_transition,
        )
    }

    fn new(
        geometry: PagedGeometry,
        style: PagedStyle,
        count: usize,
        current: usize,
        observers: Observers,
        next_transition: u64,
    ) -> Self {
        Self {
            geometry,
            style,
            count,
            current: current.min(count.saturating_sub(1)),
            scroll_offset: 0.0,
            drag_origin: None,
            recycler: Recycler::new(),
            transitions: Transitions::starting_at(next_transition),
            observers,
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub(crate) fn recycler(&self) -> &Recycler {
        &self.recycler
    }

    pub(crate) fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }

    pub(crate) fn next_transition(&self) -> u64 {
        self.transitions.next_raw()
    }

    /// Scrollable content width for the current count.
    pub(crate) fn content_extent(&self, bounds: Size) -> f64 {
        let container = self.geometry.container(bounds);
        self.geometry.content_extent(self.count, container)
    }

    /// Gives up the observers and destroys every item.
    pub(crate) fn teardown<H: CarouselHost + ?Sized>(&mut self, host: &mut H) -> Observers {
        self.recycler.destroy_all(host);
        core::mem::take(&mut self.observers)
    }

    /// Full layout pass.
    ///
    /// Outside a drag this also re-anchors the scroll offset on the current
    /// page, which keeps the offset valid after the bounds change.
    pub(crate) fn layout<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        let container = self.geometry.container(host.bounds());
        if self.drag_origin.is_none() && self.count > 0 {
            self.scroll_offset = self.geometry.scroll_offset(self.current, container);
        }
        self.relayout(container, host);
    }

    /// Feeds a host-driven scroll offset (deceleration, animated scroll ticks).
    pub(crate) fn set_scroll_offset<H: CarouselHost + ?Sized>(&mut self, offset: f64, host: &mut H) {
        self.did_scroll(offset, host);
    }

    pub(crate) fn pan<H: CarouselHost + ?Sized>(&mut self, event: PanEvent, host: &mut H) {
        match event.phase {
            PanPhase::Began => {
                self.transitions.cancel(Channel::Scroll);
                self.drag_origin = Some(self.scroll_offset);
                self.observers.begin();
            }
            PanPhase::Changed => {
                let origin = *self.drag_origin.get_or_insert(self.scroll_offset);
                self.did_scroll(origin - event.translation.x, host);
            }
            PanPhase::Ended | PanPhase::Cancelled => {
                if let Some(origin) = self.drag_origin.take() {
                    self.did_scroll(origin - event.translation.x, host);
                }
                self.scroll_to(self.current, host);
                self.observers.end();
            }
        }
    }

    pub(crate) fn complete_transition<H: CarouselHost + ?Sized>(
        &mut self,
        id: TransitionId,
        finished: bool,
        host: &mut H,
    ) {
        let Some(then) = self.transitions.take(id) else {
            carousel_trace!(id = id.get(), "ignored superseded transition");
            return;
        };
        carousel_trace!(id = id.get(), finished, "transition completed");
        if !finished {
            return;
        }
        if then == Some(Then::Settle) {
            self.reconcile_scales(host);
        }
    }

    pub(crate) fn previous_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        if self.current > 0 && self.count > 0 {
            self.scroll_to(self.current - 1, host);
        }
    }

    pub(crate) fn next_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        if self.current + 1 < self.count {
            self.scroll_to(self.current + 1, host);
        }
    }

    pub(crate) fn loop_previous_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        if self.count == 0 {
            return;
        }
        let page = match self.current {
            0 => self.count - 1,
            page => page - 1,
        };
        self.scroll_to(page, host);
    }

    pub(crate) fn loop_next_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        if self.count == 0 {
            return;
        }
        let page = if self.current + 1 >= self.count {
            0
        } else {
            self.current + 1
        };
        self.scroll_to(page, host);
    }

    /// Scrolls to `page`; out-of-range pages are ignored.
    pub(crate) fn update_current_page<H: CarouselHost + ?Sized>(&mut self, page: usize, host: &mut H) {
        if page < self.count {
            self.scroll_to(page, host);
        }
    }

    pub(crate) fn update_count<H: CarouselHost + ?Sized>(&mut self, count: usize, host: &mut H) {
        let old = self.current;
        self.count = count;
        self.current = old.min(count.saturating_sub(1));
        carousel_debug!(count, current = self.current, "paged count updated");
        self.observers.page_change(old, self.current);
        self.transitions.cancel(Channel::Scroll);
        self.drag_origin = None;
        self.layout(host);
    }

    /// Moves the model offset to `page` at once and asks the host to animate
    /// the viewport there.
    fn scroll_to<H: CarouselHost + ?Sized>(&mut self, page: usize, host: &mut H) {
        let container = self.geometry.container(host.bounds());
        let from = self.scroll_offset;
        let to = self.geometry.scroll_offset(page, container);
        if page == self.current && from == to && !self.transitions.is_pending(Channel::Scroll) {
            self.reconcile_scales(host);
            return;
        }
        self.did_scroll(to, host);
        let id = self.transitions.issue(Channel::Scroll, Some(Then::Settle));
        carousel_trace!(id = id.get(), from, to, page, "animate scroll");
        host.animate(Transition {
            id,
            duration: SCROLL_DURATION,
            target: TransitionTarget::Scroll { from, to },
        });
    }

    fn did_scroll<H: CarouselHost + ?Sized>(&mut self, offset: f64, host: &mut H) {
        let container = self.geometry.container(host.bounds());
        self.scroll_offset = offset;
        let old = self.current;
        let (page, progress) = self.geometry.page_at(offset, self.count, container);
        self.current = page;
        self.observers.change(progress);
        self.relayout(container, host);
        self.observers.page_change(old, page);
    }

    /// The current page's viewport, widened to cover the live scroll position.
    fn visible_rect(&self, container: Size) -> Rect {
        let anchored = self.geometry.visible_rect(self.current, container);
        let viewport = Rect::from_origin_size((self.scroll_offset, 0.0), container);
        anchored.union(viewport)
    }

    fn relayout<H: CarouselHost + ?Sized>(&mut self, container: Size, host: &mut H) {
        if self.count == 0 {
            self.recycler.retire_all(host);
            return;
        }
        let visible = self.visible_rect(container);
        let current = self.current;
        let count = self.count;
        let geometry = self.geometry;

        let retirees: SmallVec<[ItemId; 8]> = self
            .recycler
            .visible()
            .filter(|(_, state)| match state.page {
                Some(page) if page < count => {
                    let side = if page < current { Side::Left } else { Side::Right };
                    !PagedGeometry::reaches(geometry.item_frame(page, container), side, visible)
                }
                _ => true,
            })
            .map(|(id, _)| id)
            .collect();
        for id in retirees {
            self.recycler.retire(id, None, host);
        }

        self.recycler
            .acquire(current, geometry.item_frame(current, container), host);
        for page in (0..current).rev() {
            let frame = geometry.item_frame(page, container);
            if !PagedGeometry::reaches(frame, Side::Left, visible) {
                break;
            }
            self.recycler.acquire(page, frame, host);
        }
        for page in current + 1..count {
            let frame = geometry.item_frame(page, container);
            if !PagedGeometry::reaches(frame, Side::Right, visible) {
                break;
            }
            self.recycler.acquire(page, frame, host);
        }

        self.transform(container);
        self.recycler.apply_all(host);
    }

    /// Sets frames, discrete and applied scales, and stacking order.
    fn transform(&mut self, container: Size) {
        let current = self.current;
        let geometry = self.geometry;
        let mid = self.scroll_offset + container.width * 0.5;
        let falloff = match self.style {
            PagedStyle::Flat => None,
            PagedStyle::CenterScale { scale_step } => Some((
                scale_step,
                geometry.falloff_distance(scale_step, container),
            )),
        };
        for (_, state) in self.recycler.visible_mut() {
            let Some(page) = state.page else {
                continue;
            };
            let level = page.abs_diff(current);
            state.frame = geometry.item_frame(page, container);
            state.rest_frame = state.frame;
            state.z_index = -(level as isize);
            let (scale, applied) = match falloff {
                None => (1.0, 1.0),
                Some((step, distance)) => (
                    level_scale(level, step),
                    triangular_scale(state.frame.center().x - mid, distance),
                ),
            };
            state.scale = scale;
            state.animated_scale = applied;
        }
    }

    /// Animates applied scales to their discrete values.
    fn reconcile_scales<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        if self.style == PagedStyle::Flat {
            return;
        }
        let mut targets = Vec::new();
        for (id, state) in self.recycler.visible_mut() {
            if (state.animated_scale - state.scale).abs() > SCALE_EPSILON {
                state.animated_scale = state.scale;
                targets.push(ItemTarget {
                    id,
                    frame: state.frame,
                    scale: state.scale,
                });
            }
        }
        if targets.is_empty() {
            return;
        }
        targets.sort_unstable_by_key(|t| t.id);
        animate_items(&mut self.transitions, None, targets, SETTLE_DURATION, host);
    }
}
