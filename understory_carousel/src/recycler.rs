// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item virtualization: the visible set and the reuse pool.
//!
//! The [`Recycler`] owns the state of every item an engine has created. Each
//! item is either *visible* (bound to a page) or *reusable* (unbound, waiting
//! in the pool). Neither collection is ordered in any meaningful way; draw
//! order comes from [`ItemState::z_index`].
//!
//! Materializing a page prefers the item already bound to it, then the most
//! recently retired item, and only then asks the host to create a new one.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::host::{CarouselHost, FADE_DURATION};
use crate::item::{ItemId, ItemState};

/// How [`Recycler::acquire`] produced an item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Acquired {
    /// The page already had a visible item.
    Visible,
    /// An item from the reuse pool was rebound.
    Reused,
    /// The host created a new item.
    Created,
}

/// Visible set and reuse pool of one carousel engine.
#[derive(Clone, Debug, Default)]
pub struct Recycler {
    items: HashMap<ItemId, ItemState>,
    visible: Vec<ItemId>,
    reusable: Vec<ItemId>,
    next_id: u32,
}

impl Recycler {
    /// Creates an empty recycler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of an item, visible or pooled.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemState> {
        self.items.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemState> {
        self.items.get_mut(&id)
    }

    /// Ids of the visible items, in no particular order.
    #[must_use]
    pub fn visible_ids(&self) -> &[ItemId] {
        &self.visible
    }

    /// Ids of the pooled items; the last one is reused first.
    #[must_use]
    pub fn reusable_ids(&self) -> &[ItemId] {
        &self.reusable
    }

    /// Iterates visible items with their state.
    pub fn visible(&self) -> impl Iterator<Item = (ItemId, &ItemState)> + '_ {
        self.visible
            .iter()
            .filter_map(|id| self.items.get(id).map(|state| (*id, state)))
    }

    pub(crate) fn visible_mut(&mut self) -> impl Iterator<Item = (ItemId, &mut ItemState)> + '_ {
        let visible = &self.visible;
        self.items
            .iter_mut()
            .filter(|(id, _)| visible.contains(id))
            .map(|(id, state)| (*id, state))
    }

    /// Number of visible items.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Number of pooled items.
    #[must_use]
    pub fn reusable_len(&self) -> usize {
        self.reusable.len()
    }

    /// The visible item bound to `page`.
    #[must_use]
    pub fn find(&self, page: usize) -> Option<ItemId> {
        self.visible()
            .find(|(_, state)| state.page == Some(page))
            .map(|(id, _)| id)
    }

    /// Pages of the visible items, sorted.
    #[must_use]
    pub fn visible_pages(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = self.visible().filter_map(|(_, s)| s.page).collect();
        pages.sort_unstable();
        pages
    }

    /// Visible ids sorted back to front by z-index.
    #[must_use]
    pub fn draw_order(&self) -> Vec<ItemId> {
        let mut order: Vec<(isize, ItemId)> =
            self.visible().map(|(id, s)| (s.z_index, id)).collect();
        order.sort_unstable();
        order.into_iter().map(|(_, id)| id).collect()
    }

    /// Makes sure `page` has a visible item laid out at `frame`.
    ///
    /// Rebound and created items are rendered (once per binding) and faded in.
    pub fn acquire<H: CarouselHost + ?Sized>(
        &mut self,
        page: usize,
        frame: Rect,
        host: &mut H,
    ) -> (ItemId, Acquired) {
        if let Some(id) = self.find(page) {
            if let Some(state) = self.items.get_mut(&id) {
                state.frame = frame;
            }
            return (id, Acquired::Visible);
        }

        let (id, acquired) = match self.reusable.pop() {
            Some(id) => {
                self.items.insert(id, ItemState::bound(page, frame));
                carousel_trace!(item = id.get(), page, "reused item");
                (id, Acquired::Reused)
            }
            None => {
                let id = ItemId::new(self.next_id);
                self.next_id += 1;
                self.items.insert(id, ItemState::bound(page, frame));
                host.create_item(id, page, frame);
                carousel_trace!(item = id.get(), page, "created item");
                (id, Acquired::Created)
            }
        };
        self.visible.push(id);
        self.render_if_needed(id, host);
        host.fade_in(id, FADE_DURATION);
        (id, acquired)
    }

    fn render_if_needed<H: CarouselHost + ?Sized>(&mut self, id: ItemId, host: &mut H) {
        let Some(state) = self.items.get_mut(&id) else {
            return;
        };
        if state.displayed {
            return;
        }
        if let Some(page) = state.page {
            host.render(id, page);
            state.displayed = true;
        }
    }

    /// Moves a visible item to the reuse pool.
    ///
    /// The host fades out a snapshot (under `below`, if given), then the item
    /// is reset and handed to [`CarouselHost::prepare_for_reuse`].
    pub fn retire<H: CarouselHost + ?Sized>(
        &mut self,
        id: ItemId,
        below: Option<ItemId>,
        host: &mut H,
    ) {
        let Some(index) = self.visible.iter().position(|v| *v == id) else {
            return;
        };
        self.visible.swap_remove(index);
        host.fade_out(id, below, FADE_DURATION);
        if let Some(state) = self.items.get_mut(&id) {
            carousel_trace!(item = id.get(), page = ?state.page, "retired item");
            state.reset();
        }
        host.prepare_for_reuse(id);
        self.reusable.push(id);
    }

    /// Retires every visible item.
    pub fn retire_all<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        while let Some(&id) = self.visible.last() {
            self.retire(id, None, host);
        }
    }

    /// Destroys every item, visible or pooled.
    pub fn destroy_all<H: CarouselHost + ?Sized>(&mut self, host: &mut H) {
        let mut ids: Vec<ItemId> = self.items.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            host.destroy_item(id);
        }
        self.items.clear();
        self.visible.clear();
        self.reusable.clear();
    }

    /// Pushes the state of every visible item to the host.
    pub fn apply_all<H: CarouselHost + ?Sized>(&self, host: &mut H) {
        for (id, state) in self.visible() {
            host.apply(id, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::*;
    use crate::host::Transition;

    #[derive(Default)]
    struct Log {
        created: Vec<ItemId>,
        rendered: Vec<(ItemId, usize)>,
        reset: Vec<ItemId>,
        destroyed: Vec<ItemId>,
    }

    impl CarouselHost for Log {
        fn bounds(&self) -> Size {
            Size::new(100.0, 100.0)
        }
        fn create_item(&mut self, id: ItemId, _page: usize, _frame: Rect) {
            self.created.push(id);
        }
        fn render(&mut self, id: ItemId, page: usize) {
            self.rendered.push((id, page));
        }
        fn prepare_for_reuse(&mut self, id: ItemId) {
            self.reset.push(id);
        }
        fn destroy_item(&mut self, id: ItemId) {
            self.destroyed.push(id);
        }
        fn apply(&mut self, _id: ItemId, _state: &ItemState) {}
        fn fade_in(&mut self, _id: ItemId, _duration: f64) {}
        fn fade_out(&mut self, _id: ItemId, _below: Option<ItemId>, _duration: f64) {}
        fn animate(&mut self, _transition: Transition) {}
    }

    #[test]
    fn acquire_prefers_visible_then_pool() {
        let mut host = Log::default();
        let mut recycler = Recycler::new();

        let (a, how) = recycler.acquire(0, Rect::ZERO, &mut host);
        assert_eq!(how, Acquired::Created);
        let (b, how) = recycler.acquire(1, Rect::ZERO, &mut host);
        assert_eq!(how, Acquired::Created);
        assert_eq!(recycler.acquire(0, Rect::ZERO, &mut host), (a, Acquired::Visible));

        recycler.retire(a, None, &mut host);
        recycler.retire(b, None, &mut host);
        assert_eq!(host.reset, [a, b]);

        // Last in, first out.
        assert_eq!(recycler.acquire(7, Rect::ZERO, &mut host), (b, Acquired::Reused));
        assert_eq!(recycler.get(b).and_then(|s| s.page), Some(7));
        assert_eq!(host.created.len(), 2);
        assert_eq!(host.rendered, [(a, 0), (b, 1), (b, 7)]);
    }

    #[test]
    fn visible_and_pool_stay_disjoint() {
        let mut host = Log::default();
        let mut recycler = Recycler::new();
        let ids: Vec<ItemId> = (0..4)
            .map(|page| recycler.acquire(page, Rect::ZERO, &mut host).0)
            .collect();
        recycler.retire(ids[1], None, &mut host);
        recycler.retire(ids[1], None, &mut host);
        recycler.retire(ids[3], None, &mut host);

        for id in recycler.reusable_ids() {
            assert!(!recycler.visible_ids().contains(id));
            assert_eq!(recycler.get(*id).and_then(|s| s.page), None);
        }
        assert_eq!(recycler.reusable_len(), 2);
        assert_eq!(recycler.visible_pages(), [0, 2]);
    }

    #[test]
    fn draw_order_sorts_by_z_index() {
        let mut host = Log::default();
        let mut recycler = Recycler::new();
        for (page, z) in [(0, 3), (1, 1), (2, 2)] {
            let (id, _) = recycler.acquire(page, Rect::ZERO, &mut host);
            recycler.get_mut(id).unwrap().z_index = z;
        }
        let pages: Vec<usize> = recycler
            .draw_order()
            .into_iter()
            .filter_map(|id| recycler.get(id).and_then(|s| s.page))
            .collect();
        assert_eq!(pages, [1, 2, 0]);
    }

    #[test]
    fn destroy_all_forgets_everything() {
        let mut host = Log::default();
        let mut recycler = Recycler::new();
        let (a, _) = recycler.acquire(0, Rect::ZERO, &mut host);
        let (b, _) = recycler.acquire(1, Rect::ZERO, &mut host);
        recycler.retire(a, None, &mut host);
        recycler.destroy_all(&mut host);

        assert_eq!(host.destroyed, [a, b]);
        assert_eq!(recycler.visible_len(), 0);
        assert_eq!(recycler.reusable_len(), 0);
        assert!(recycler.get(a).is_none());
    }
}
