// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Carousel`] facade.

use alloc::vec::Vec;

use kurbo::Size;

use crate::config::{CarouselMode, ConfigError};
use crate::drag::{DragPhase, PanEvent};
use crate::host::{CarouselHost, TransitionId};
use crate::item::{ItemId, ItemState};
use crate::mode::{PagedPager, StackPager};
use crate::observer::Observers;
use crate::ring::Ring;

/// The engine for the active mode.
#[derive(Debug)]
enum ModeState {
    Linear(PagedPager),
    CenterScale(PagedPager),
    Stack(StackPager),
}

/// Runs `$body` with `$engine` bound to whichever engine is active.
macro_rules! dispatch {
    ($state:expr, $engine:ident => $body:expr) => {
        match $state {
            ModeState::Linear($engine) | ModeState::CenterScale($engine) => $body,
            ModeState::Stack($engine) => $body,
        }
    };
}

impl ModeState {
    fn build(
        mode: &CarouselMode,
        count: usize,
        current: usize,
        observers: Observers,
        next_transition: u64,
    ) -> Self {
        match mode {
            CarouselMode::Linear(config) => Self::Linear(PagedPager::linear(
                config,
                count,
                current,
                observers,
                next_transition,
            )),
            CarouselMode::CenterScale(config) => Self::CenterScale(PagedPager::center_scale(
                config,
                count,
                current,
                observers,
                next_transition,
            )),
            CarouselMode::Stack(config) => Self::Stack(StackPager::new(
                config,
                count,
                current,
                observers,
                next_transition,
            )),
        }
    }
}

/// A paging carousel over `count` pages in one of three [`CarouselMode`]s.
///
/// The carousel is headless: every operation that can create, move, or
/// animate items takes the [`CarouselHost`] that owns the views. Nothing is
/// materialized until the first [`layout`](Self::layout).
///
/// Page indices outside `0..count` are ignored by every operation.
#[derive(Debug)]
pub struct Carousel {
    mode: CarouselMode,
    state: ModeState,
}

impl Carousel {
    /// Creates a carousel, clamping the configuration into range.
    #[must_use]
    pub fn new(mode: CarouselMode, count: usize, current: usize) -> Self {
        let mode = mode.normalized();
        Self {
            state: ModeState::build(&mode, count, current, Observers::default(), 0),
            mode,
        }
    }

    /// Creates a carousel, rejecting an out-of-range configuration.
    pub fn try_new(mode: CarouselMode, count: usize, current: usize) -> Result<Self, ConfigError> {
        mode.validate()?;
        Ok(Self::new(mode, count, current))
    }

    /// The active mode and its configuration.
    #[must_use]
    pub fn mode(&self) -> &CarouselMode {
        &self.mode
    }

    /// Switches to another mode, keeping the current page, count, and observers.
    ///
    /// The old mode's items are destroyed and the new mode lays out at once.
    /// Switching to the mode already active does nothing.
    pub fn set_mode<H: CarouselHost + ?Sized>(&mut self, mode: CarouselMode, host: &mut H) {
        let mode = mode.normalized();
        if mode == self.mode {
            return;
        }
        let count = self.count();
        let current = self.current_page();
        let next_transition = dispatch!(&self.state, engine => engine.next_transition());
        let observers = dispatch!(&mut self.state, engine => engine.teardown(host));
        self.state = ModeState::build(&mode, count, current, observers, next_transition);
        self.mode = mode;
        carousel_debug!(mode = ?self.mode, count, current, "mode switched");
        self.layout(host);
    }

    /// Like [`set_mode`](Self::set_mode), but rejects an out-of-range configuration.
    pub fn try_set_mode<H: CarouselHost + ?Sized>(
        &mut self,
        mode: CarouselMode,
        host: &mut H,
    ) -> Result<(), ConfigError> {
        mode.validate()?;
        self.set_mode(mode, host);
        Ok(())
    }

    /// The current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        dispatch!(&self.state, engine => engine.current())
    }

    /// Number of pages.
    #[must_use]
    pub fn count(&self) -> usize {
        dispatch!(&self.state, engine => engine.count())
    }

    /// Lays out the visible window for the host's current bounds.
    ///
    /// Call after creation and whenever the bounds change.
    pub fn layout<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.layout(host));
    }

    /// Feeds one pan gesture sample.
    pub fn pan<H: CarouselHost + ?Sized>(&mut self, event: PanEvent, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.pan(event, host));
    }

    /// Feeds a host-driven scroll offset, such as a deceleration tick.
    ///
    /// Only the paged modes scroll; the stack ignores this.
    pub fn set_scroll_offset<H: CarouselHost + ?Sized>(&mut self, offset: f64, host: &mut H) {
        match &mut self.state {
            ModeState::Linear(pager) | ModeState::CenterScale(pager) => {
                pager.set_scroll_offset(offset, host);
            }
            ModeState::Stack(_) => {}
        }
    }

    /// Reports the outcome of a transition handed to [`CarouselHost::animate`].
    ///
    /// Only the most recent transition on each channel runs its follow-up;
    /// completions of superseded transitions, and unfinished ones, are ignored.
    pub fn complete_transition<H: CarouselHost + ?Sized>(
        &mut self,
        id: TransitionId,
        finished: bool,
        host: &mut H,
    ) {
        dispatch!(&mut self.state, engine => engine.complete_transition(id, finished, host));
    }

    /// Moves to the previous page; does nothing on the first page.
    pub fn previous_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.previous_page(host));
    }

    /// Moves to the next page; does nothing on the last page.
    pub fn next_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.next_page(host));
    }

    /// Moves to the previous page, wrapping to the last one.
    pub fn loop_previous_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.loop_previous_page(host));
    }

    /// Moves to the next page, wrapping to the first one.
    pub fn loop_next_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.loop_next_page(host));
    }

    /// Makes `page` current and relays out synchronously.
    pub fn update_current_page<H: CarouselHost + ?Sized>(&mut self, page: usize, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.update_current_page(page, host));
    }

    /// Changes the page count, clamping the current page, and relays out.
    pub fn update_count<H: CarouselHost + ?Sized>(&mut self, count: usize, host: &mut H) {
        dispatch!(&mut self.state, engine => engine.update_count(count, host));
    }

    fn observers_mut(&mut self) -> &mut Observers {
        dispatch!(&mut self.state, engine => engine.observers_mut())
    }

    /// Called when a drag begins.
    pub fn on_begin_scroll(&mut self, f: impl FnMut() + 'static) {
        self.observers_mut().set_begin(f);
    }

    /// Called with the progress toward the neighbouring page as it changes.
    pub fn on_change_scroll(&mut self, f: impl FnMut(f64) + 'static) {
        self.observers_mut().set_change(f);
    }

    /// Called when a drag ends or is cancelled.
    pub fn on_end_scroll(&mut self, f: impl FnMut() + 'static) {
        self.observers_mut().set_end(f);
    }

    /// Called with `(old, new)` once per committed page change.
    pub fn on_page_change(&mut self, f: impl FnMut(usize, usize) + 'static) {
        self.observers_mut().set_page_change(f);
    }

    /// Visible items with their state, in no particular order.
    pub fn visible_items(&self) -> impl Iterator<Item = (ItemId, &ItemState)> + '_ {
        dispatch!(&self.state, engine => engine.recycler().visible())
    }

    /// Pages with a visible item, sorted.
    #[must_use]
    pub fn visible_pages(&self) -> Vec<usize> {
        dispatch!(&self.state, engine => engine.recycler().visible_pages())
    }

    /// State of an item, visible or pooled.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&ItemState> {
        dispatch!(&self.state, engine => engine.recycler().get(id))
    }

    /// The visible item bound to `page`.
    #[must_use]
    pub fn item_for_page(&self, page: usize) -> Option<ItemId> {
        dispatch!(&self.state, engine => engine.recycler().find(page))
    }

    /// Number of items waiting in the reuse pool.
    #[must_use]
    pub fn reusable_count(&self) -> usize {
        dispatch!(&self.state, engine => engine.recycler().reusable_len())
    }

    /// Visible items back to front, for hosts without a z-index primitive.
    #[must_use]
    pub fn draw_order(&self) -> Vec<ItemId> {
        dispatch!(&self.state, engine => engine.recycler().draw_order())
    }

    /// Scroll offset of the paged modes; `None` for the stack.
    #[must_use]
    pub fn scroll_offset(&self) -> Option<f64> {
        match &self.state {
            ModeState::Linear(pager) | ModeState::CenterScale(pager) => Some(pager.scroll_offset()),
            ModeState::Stack(_) => None,
        }
    }

    /// Scrollable content width of the paged modes for `bounds`; `None` for the stack.
    #[must_use]
    pub fn content_extent(&self, bounds: Size) -> Option<f64> {
        match &self.state {
            ModeState::Linear(pager) | ModeState::CenterScale(pager) => {
                Some(pager.content_extent(bounds))
            }
            ModeState::Stack(_) => None,
        }
    }

    /// The stack's page ring; `None` for the paged modes.
    #[must_use]
    pub fn ring(&self) -> Option<&Ring> {
        match &self.state {
            ModeState::Stack(stack) => Some(stack.ring()),
            _ => None,
        }
    }

    /// Returns `true` while a pan gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        match &self.state {
            ModeState::Linear(pager) | ModeState::CenterScale(pager) => pager.is_dragging(),
            ModeState::Stack(stack) => stack.drag_phase() != DragPhase::Idle,
        }
    }
}
