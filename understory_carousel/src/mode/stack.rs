// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular stack engine.
//!
//! Pages are laid out around the [`Ring`]: the current page in the middle,
//! every other page displaced outward and shrunk by its level. Dragging
//! interpolates each item toward its ring neighbour's resting frame and
//! rotates the ring whenever the drag crosses a break width.

use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::config::StackConfig;
use crate::drag::{DragPhase, DragSession, PanEvent, PanPhase};
use crate::geometry::{Side, StackGeometry, lerp_rect, level_scale, triangular_scale};
use crate::host::{CarouselHost, ItemTarget, SETTLE_DURATION, TransitionId};
use crate::item::ItemId;
use crate::observer::Observers;
use crate::recycler::Recycler;
use crate::ring::{Location, Ring, RotateDirection};
use crate::transition::{Channel, Transitions};

use super::animate_items;

/// What to do when an item transition settles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Then {
    /// Snap items to their resting frames.
    Settle,
    /// Rotate the ring one page.
    Rotate(RotateDirection),
}

fn side_of(location: Location) -> Side {
    match location {
        Location::Left => Side::Left,
        Location::Center | Location::Right => Side::Right,
    }
}

/// The ring neighbour an item moves to when rotating toward `direction`.
fn neighbour(ring: &Ring, page: usize, direction: RotateDirection) -> usize {
    match direction {
        RotateDirection::Next => ring.previous_in_ring(page),
        RotateDirection::Previous => ring.next_in_ring(page),
    }
}

/// Unscaled frame of `page` for the ring's current state.
fn origin_frame(geometry: &StackGeometry, ring: &Ring, page: usize) -> Rect {
    geometry.origin_frame(ring.level(page), ring.location(page))
}

/// Frame of `page` at its discrete level scale.
fn rest_frame(geometry: &StackGeometry, ring: &Ring, page: usize) -> Rect {
    geometry.rest_frame(ring.level(page), ring.location(page))
}

/// Stack engine state.
#[derive(Debug)]
pub(crate) struct StackPager {
    config: StackConfig,
    ring: Ring,
    drag: DragSession,
    recycler: Recycler,
    transitions: Transitions<Then>,
    observers: Observers,
}

impl StackPager {
    pub(crate) fn new(
        config: &StackConfig,
        count: usize,
        current: usize,
        observers: Observers,
        next_transition: u64,
    ) -> Self {
        Self {
            config: *config,
            ring: Ring::new(count, current),
            drag: DragSession::default(),
            recycler: Recycler::new(),
            transitions: Transitions::starting_at(next_transition),
            observers,
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.ring.count()
    }

    pub(crate) fn current(&self) -> usize {
        self.ring.current()
    }

    pub(crate) fn ring(&self) -> &Ring {
        &self.ring
    }

    pub(crate) fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
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

    /// Gives up the observers and destroys every item.
    pub(crate) fn teardown<H: CarouselHost + ?Sized>(&mut self, host: &mut H) -> Observers {
        self.recycler.destroy_all(host);
        core::mem::take(&mut self.observers)
    }

    fn geometry<H: CarouselHost + ?Sized>(&self, host: &H) -> StackGeometry {
        StackGeometry::new(&self.config, host.bounds())
    }

    pub(crate) fn layout<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        let geometry = self.geometry(host);
        self.relayout(&geometry, host);
    }

    fn relayout<H: CarouselHost + ?Sized>(&mut self, geometry: &StackGeometry, host: &mut H) {
        if self.ring.is_empty() {
            self.recycler.retire_all(host);
            return;
        }
        let visible = geometry.visible_rect();
        let ring = &self.ring;

        let retirees: SmallVec<[ItemId; 8]> = self
            .recycler
            .visible()
            .filter(|(_, state)| match state.page {
                Some(page) if ring.contains(page) => {
                    let side = side_of(ring.location(page));
                    !StackGeometry::fits(origin_frame(geometry, ring, page), side, visible)
                }
                _ => true,
            })
            .map(|(id, _)| id)
            .collect();
        for id in retirees {
            let below = self.fade_anchor(id);
            self.recycler.retire(id, below, host);
        }

        let ring = &self.ring;
        let mut pages: SmallVec<[usize; 16]> = SmallVec::new();
        pages.push(ring.current());
        let (mut left_done, mut right_done) = (false, false);
        ring.un_center_iterate(|left, right| {
            if !left_done {
                match left {
                    Some(page)
                        if StackGeometry::fits(
                            origin_frame(geometry, ring, page),
                            Side::Left,
                            visible,
                        ) =>
                    {
                        pages.push(page);
                    }
                    _ => left_done = true,
                }
            }
            if !right_done {
                match right {
                    Some(page)
                        if StackGeometry::fits(
                            origin_frame(geometry, ring, page),
                            Side::Right,
                            visible,
                        ) =>
                    {
                        pages.push(page);
                    }
                    _ => right_done = true,
                }
            }
            left_done && right_done
        });

        for page in pages {
            let frame = origin_frame(geometry, &self.ring, page);
            self.recycler.acquire(page, frame, host);
        }

        self.transform(geometry);
        self.recycler.apply_all(host);
    }

    /// The visible item a retiring item's fade snapshot goes under: the one
    /// stacked where the page before it sits.
    fn fade_anchor(&self, id: ItemId) -> Option<ItemId> {
        let page = self.recycler.get(id)?.page?;
        let z_index = self.ring.z_index(self.ring.previous(page));
        self.recycler
            .visible()
            .find(|(other, state)| *other != id && state.z_index == z_index)
            .map(|(other, _)| other)
    }

    /// Sets stacking order, scales, and the scaled frames of every visible item.
    fn transform(&mut self, geometry: &StackGeometry) {
        let ring = &self.ring;
        let compress = geometry.compress_rect(ring.side_count());
        let mid = compress.center().x;
        let width = compress.width();
        let scale_step = self.config.scale_step;
        for (_, state) in self.recycler.visible_mut() {
            let Some(page) = state.page else {
                continue;
            };
            let level = ring.level(page);
            let location = ring.location(page);
            let origin = geometry.origin_frame(level, location);
            state.scale = level_scale(level, scale_step);
            state.animated_scale = triangular_scale(origin.center().x - mid, width);
            state.frame = geometry.scaled_frame(origin, location, state.animated_scale);
            state.rest_frame = geometry.scaled_frame(origin, location, state.scale);
            state.z_index = ring.z_index(page);
        }
    }

    /// Moves every item `progress` of the way toward its neighbour's resting frame.
    fn interpolate(&mut self, geometry: &StackGeometry, direction: RotateDirection, progress: f64) {
        let ring = &self.ring;
        for (_, state) in self.recycler.visible_mut() {
            let Some(page) = state.page else {
                continue;
            };
            let from = state.rest_frame;
            let to = rest_frame(geometry, ring, neighbour(ring, page, direction));
            state.frame = lerp_rect(from, to, progress);
        }
    }

    /// Rotates one page, relays out, and reports the page change.
    fn rotate_translation<H: CarouselHost + ?Sized>(
        &mut self,
        geometry: &StackGeometry,
        direction: RotateDirection,
        host: &mut H,
    ) {
        let old = self.ring.current();
        self.ring.rotate(direction, 1);
        carousel_debug!(?direction, old, new = self.ring.current(), "ring rotated");
        self.relayout(geometry, host);
        self.observers.page_change(old, self.ring.current());
    }

    /// Puts every item back at its discrete resting frame.
    ///
    /// Returns the animation targets.
    fn snap_to_rest(&mut self, geometry: &StackGeometry) -> Vec<ItemTarget> {
        let ring = &self.ring;
        let scale_step = self.config.scale_step;
        let mut targets = Vec::new();
        for (id, state) in self.recycler.visible_mut() {
            let Some(page) = state.page else {
                continue;
            };
            let level = ring.level(page);
            state.rest_frame = geometry.rest_frame(level, ring.location(page));
            state.frame = state.rest_frame;
            state.animated_scale = level_scale(level, scale_step);
            targets.push(ItemTarget {
                id,
                frame: state.frame,
                scale: state.animated_scale,
            });
        }
        targets.sort_unstable_by_key(|t| t.id);
        targets
    }

    pub(crate) fn pan<H: CarouselHost + ?Sized>(&mut self, event: PanEvent, host: &mut H) {
        let geometry = self.geometry(host);
        match event.phase {
            PanPhase::Began => {
                self.finish_pending_step(&geometry, host);
                self.transitions.cancel(Channel::Items);
                self.drag.begin();
                self.observers.begin();
            }
            PanPhase::Changed => {
                if !self.drag.is_active() {
                    self.drag.begin();
                }
                let update = self
                    .drag
                    .update(event.translation, geometry.break_width());
                self.interpolate(&geometry, update.direction, update.progress);
                self.recycler.apply_all(host);
                self.observers.change(update.progress);
                if update.commit {
                    self.interpolate(&geometry, update.direction, 1.0);
                    self.rotate_translation(&geometry, update.direction, host);
                    self.observers.change(1.0);
                }
            }
            PanPhase::Ended | PanPhase::Cancelled => {
                let targets = self.snap_to_rest(&geometry);
                if !targets.is_empty() {
                    animate_items(
                        &mut self.transitions,
                        Some(Then::Settle),
                        targets,
                        SETTLE_DURATION,
                        host,
                    );
                }
                self.drag.end();
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
        let geometry = self.geometry(host);
        match then {
            Some(Then::Settle) => {
                self.snap_to_rest(&geometry);
                self.recycler.apply_all(host);
            }
            Some(Then::Rotate(direction)) => self.rotate_translation(&geometry, direction, host),
            None => {}
        }
    }

    /// Applies the rotation of a step whose animation has not finished yet.
    ///
    /// Anything else pending on the item channel is dropped.
    fn finish_pending_step<H: CarouselHost + ?Sized>(
        &mut self,
        geometry: &StackGeometry,
        host: &mut H,
    ) {
        if let Some(Some(Then::Rotate(direction))) = self.transitions.take_channel(Channel::Items) {
            carousel_trace!(?direction, "finishing interrupted step");
            self.rotate_translation(geometry, direction, host);
        }
    }

    /// Animates one page toward `direction`; the ring rotates when the
    /// animation finishes.
    ///
    /// A step still in flight rotates at once, so quick repeated steps each
    /// advance one page.
    fn step<H: CarouselHost + ?Sized>(&mut self, direction: RotateDirection, host: &mut H) {
        if self.ring.is_empty() {
            return;
        }
        let geometry = self.geometry(host);
        self.finish_pending_step(&geometry, host);
        let ring = &self.ring;
        let scale_step = self.config.scale_step;
        let mut targets = Vec::new();
        for (id, state) in self.recycler.visible_mut() {
            let Some(page) = state.page else {
                continue;
            };
            let to = neighbour(ring, page, direction);
            state.frame = rest_frame(&geometry, ring, to);
            targets.push(ItemTarget {
                id,
                frame: state.frame,
                scale: level_scale(ring.level(to), scale_step),
            });
        }
        if targets.is_empty() {
            self.rotate_translation(&geometry, direction, host);
            return;
        }
        targets.sort_unstable_by_key(|t| t.id);
        animate_items(
            &mut self.transitions,
            Some(Then::Rotate(direction)),
            targets,
            SETTLE_DURATION,
            host,
        );
    }

    pub(crate) fn previous_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        let geometry = self.geometry(host);
        self.finish_pending_step(&geometry, host);
        if self.ring.current() > 0 {
            self.step(RotateDirection::Previous, host);
        }
    }

    pub(crate) fn next_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        let geometry = self.geometry(host);
        self.finish_pending_step(&geometry, host);
        if self.ring.current() + 1 < self.ring.count() {
            self.step(RotateDirection::Next, host);
        }
    }

    pub(crate) fn loop_previous_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        self.step(RotateDirection::Previous, host);
    }

    pub(crate) fn loop_next_page<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        self.step(RotateDirection::Next, host);
    }

    /// Jumps to `page` without animation; out-of-range pages are ignored.
    pub(crate) fn update_current_page<H: CarouselHost + ?Sized>(&mut self, page: usize, host: &mut H) {
        let old = self.ring.current();
        if page >= self.ring.count() || page == old {
            return;
        }
        self.transitions.cancel(Channel::Items);
        self.ring.set_current(page);
        self.layout(host);
        self.observers.page_change(old, page);
    }

    pub(crate) fn update_count<H: CarouselHost + ?Sized>(&mut self, count: usize, host: &mut H) {
        if count == self.ring.count() {
            return;
        }
        let old = self.ring.current();
        self.ring.set_count(count);
        carousel_debug!(count, current = self.ring.current(), "stack count updated");
        self.transitions.cancel(Channel::Items);
        self.layout(host);
        self.observers.page_change(old, self.ring.current());
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::{Size, Vec2};

    use super::*;
    use crate::config::ItemSize;
    use crate::host::{Transition, TransitionTarget};
    use crate::item::ItemState;

    #[derive(Default)]
    struct Host {
        animations: Vec<Transition>,
        fades: Vec<(ItemId, Option<ItemId>)>,
    }

    impl CarouselHost for Host {
        fn bounds(&self) -> Size {
            Size::new(300.0, 400.0)
        }
        fn create_item(&mut self, _id: ItemId, _page: usize, _frame: Rect) {}
        fn render(&mut self, _id: ItemId, _page: usize) {}
        fn prepare_for_reuse(&mut self, _id: ItemId) {}
        fn destroy_item(&mut self, _id: ItemId) {}
        fn apply(&mut self, _id: ItemId, _state: &ItemState) {}
        fn fade_in(&mut self, _id: ItemId, _duration: f64) {}
        fn fade_out(&mut self, id: ItemId, below: Option<ItemId>, _duration: f64) {
            self.fades.push((id, below));
        }
        fn animate(&mut self, transition: Transition) {
            self.animations.push(transition);
        }
    }

    /// 100 wide items, 80 apart: the current page and one neighbour per side fit.
    fn config() -> StackConfig {
        StackConfig::simple()
            .with_size(ItemSize::Custom(Size::new(100.0, 200.0)))
            .with_offset_step(0.8)
            .with_scale_offsets(false)
    }

    fn record_changes(pager: &mut StackPager) -> Rc<RefCell<Vec<(usize, usize)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        pager
            .observers_mut()
            .set_page_change(move |old, new| sink.borrow_mut().push((old, new)));
        seen
    }

    #[test]
    fn layout_materializes_fitting_neighbours() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 7, 0, Observers::default(), 0);
        pager.layout(&mut host);
        assert_eq!(pager.recycler().visible_pages(), [0, 1, 6]);

        let current = pager.recycler().find(0).unwrap();
        let state = pager.recycler().get(current).unwrap();
        assert_eq!(state.z_index, 4);
        assert_eq!(state.scale, 1.0);
        let order = pager.recycler().draw_order();
        assert_eq!(order.last(), Some(&current));
    }

    #[test]
    fn unbounded_stack_shows_every_page() {
        let mut host = Host::default();
        let config = StackConfig::simple().with_size(ItemSize::Custom(Size::new(100.0, 200.0)));
        let mut pager = StackPager::new(&config, 5, 2, Observers::default(), 0);
        pager.layout(&mut host);
        assert_eq!(pager.recycler().visible_pages(), [0, 1, 2, 3, 4]);
        assert_eq!(pager.recycler().reusable_len(), 0);
    }

    #[test]
    fn programmatic_steps_rotate_on_completion() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 12, 0, Observers::default(), 0);
        let changes = record_changes(&mut pager);
        pager.layout(&mut host);

        for _ in 0..12 {
            pager.loop_next_page(&mut host);
            let id = host.animations.last().unwrap().id;
            pager.complete_transition(id, true, &mut host);
        }
        assert_eq!(pager.current(), 0);
        let expected: Vec<(usize, usize)> = (0..12).map(|i| (i, (i + 1) % 12)).collect();
        assert_eq!(*changes.borrow(), expected);
    }

    #[test]
    fn step_targets_neighbour_rest_frames() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 7, 0, Observers::default(), 0);
        pager.layout(&mut host);
        pager.next_page(&mut host);

        let TransitionTarget::Items(targets) = &host.animations[0].target else {
            panic!("expected an item transition");
        };
        let geometry = StackGeometry::new(&config(), host.bounds());
        let current = pager.recycler().find(0).unwrap();
        let target = targets.iter().find(|t| t.id == current).unwrap();
        assert_eq!(target.frame, geometry.rest_frame(1, Location::Left));
        assert_eq!(pager.current(), 0);
    }

    #[test]
    fn quick_steps_each_advance_one_page() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 7, 0, Observers::default(), 0);
        let changes = record_changes(&mut pager);
        pager.layout(&mut host);

        pager.loop_next_page(&mut host);
        pager.loop_next_page(&mut host);
        assert_eq!(pager.current(), 1);
        assert_eq!(host.animations.len(), 2);

        // The second step starts from the rotated ring.
        let TransitionTarget::Items(targets) = &host.animations[1].target else {
            panic!("expected an item transition");
        };
        let geometry = StackGeometry::new(&config(), host.bounds());
        let page_one = pager.recycler().find(1).unwrap();
        let target = targets.iter().find(|t| t.id == page_one).unwrap();
        assert_eq!(target.frame, geometry.rest_frame(1, Location::Left));

        for transition in core::mem::take(&mut host.animations) {
            pager.complete_transition(transition.id, true, &mut host);
        }
        assert_eq!(pager.current(), 2);
        assert_eq!(*changes.borrow(), [(0, 1), (1, 2)]);
    }

    #[test]
    fn quick_steps_respect_the_last_page() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 3, 1, Observers::default(), 0);
        pager.layout(&mut host);

        pager.next_page(&mut host);
        pager.next_page(&mut host);
        assert_eq!(pager.current(), 2);
        assert_eq!(host.animations.len(), 1);
        for transition in core::mem::take(&mut host.animations) {
            pager.complete_transition(transition.id, true, &mut host);
        }
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn failed_completion_does_not_rotate() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 7, 3, Observers::default(), 0);
        pager.layout(&mut host);
        pager.previous_page(&mut host);
        let id = host.animations[0].id;
        pager.complete_transition(id, false, &mut host);
        assert_eq!(pager.current(), 3);
        pager.complete_transition(id, true, &mut host);
        assert_eq!(pager.current(), 3);
    }

    #[test]
    fn non_looping_steps_stop_at_edges() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 3, 0, Observers::default(), 0);
        pager.layout(&mut host);
        pager.previous_page(&mut host);
        assert!(host.animations.is_empty());
        pager.update_current_page(2, &mut host);
        pager.next_page(&mut host);
        assert!(host.animations.is_empty());
        pager.loop_next_page(&mut host);
        assert_eq!(host.animations.len(), 1);
    }

    #[test]
    fn drag_commits_and_reverses() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 7, 0, Observers::default(), 0);
        let changes = record_changes(&mut pager);
        let progress = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&progress);
        pager
            .observers_mut()
            .set_change(move |p| sink.borrow_mut().push(p));
        pager.layout(&mut host);

        // Break width defaults to half the item width: 50.
        pager.pan(PanEvent::began(), &mut host);
        pager.pan(PanEvent::changed(Vec2::new(-25.0, 0.0)), &mut host);
        assert_eq!(pager.drag_phase(), DragPhase::Changing);
        pager.pan(PanEvent::changed(Vec2::new(-60.0, 0.0)), &mut host);
        assert_eq!(pager.drag_phase(), DragPhase::Rotating);
        assert_eq!(pager.current(), 1);
        pager.pan(PanEvent::changed(Vec2::new(-55.0, 0.0)), &mut host);
        assert_eq!(pager.current(), 1);
        assert_eq!(*changes.borrow(), [(0, 1)]);

        pager.pan(PanEvent::changed(Vec2::new(-40.0, 0.0)), &mut host);
        assert_eq!(pager.current(), 0);
        assert_eq!(*changes.borrow(), [(0, 1), (1, 0)]);

        pager.pan(PanEvent::ended(Vec2::new(-40.0, 0.0)), &mut host);
        assert_eq!(pager.drag_phase(), DragPhase::Idle);
        assert_eq!(progress.borrow().iter().filter(|p| **p == 1.0).count(), 2);

        let settle = host.animations.last().unwrap().id;
        pager.complete_transition(settle, true, &mut host);
        let geometry = StackGeometry::new(&config(), host.bounds());
        for (_, state) in pager.recycler().visible() {
            let page = state.page.unwrap();
            let ring = pager.ring();
            assert_eq!(state.frame, geometry.rest_frame(ring.level(page), ring.location(page)));
            assert_eq!(state.rest_frame, state.frame);
        }
    }

    #[test]
    fn retired_snapshots_fade_under_previous_page() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 7, 0, Observers::default(), 0);
        pager.layout(&mut host);
        let old_left = pager.recycler().find(6).unwrap();
        let old_center = pager.recycler().find(0).unwrap();

        pager.update_current_page(1, &mut host);
        assert_eq!(pager.recycler().visible_pages(), [0, 1, 2]);
        // Page 6 leaves; its snapshot goes under the item holding page 5's
        // stacking slot, which no visible item has.
        assert_eq!(host.fades, [(old_left, None)]);

        pager.update_current_page(3, &mut host);
        let fades: Vec<ItemId> = host.fades.iter().map(|(id, _)| *id).collect();
        assert!(fades.contains(&old_center));
    }

    #[test]
    fn count_changes_clamp_and_report() {
        let mut host = Host::default();
        let mut pager = StackPager::new(&config(), 8, 6, Observers::default(), 0);
        let changes = record_changes(&mut pager);
        pager.layout(&mut host);

        pager.update_count(4, &mut host);
        assert_eq!(pager.current(), 3);
        assert_eq!(*changes.borrow(), [(6, 3)]);
        assert!(pager.recycler().visible_pages().iter().all(|&p| p < 4));

        pager.update_count(0, &mut host);
        assert_eq!(pager.recycler().visible_len(), 0);
        assert_eq!(pager.current(), 0);
    }
}
