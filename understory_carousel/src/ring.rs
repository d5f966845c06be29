// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular page ring used by the stack mode.
//!
//! A [`Ring`] is a snapshot of every page index laid out around the current
//! page. The current page sits in the center slot; pages are filled outward by
//! alternately stepping backward (to the left) and forward (to the right),
//! wrapping modulo `count`. For `count = 5` around page `0` this gives:
//!
//! ```text
//! slot:  0  1  2  3  4
//! page:  2  3  4  0  1
//!                 ^ center (slot ceil(5/2) = 3)
//! ```
//!
//! The ring is the single source of truth for a page's *level* (slot distance
//! from the current page) and *location* (left, right, or center). Rotating
//! toward the next or previous page is a cyclic shift of the slots rather
//! than a rebuild.
//!
//! ## Minimal example
//!
//! ```
//! use understory_carousel::{Location, Ring, RotateDirection};
//!
//! let mut ring = Ring::new(5, 0);
//! assert_eq!(ring.slots().collect::<Vec<_>>(), [2, 3, 4, 0, 1]);
//! assert_eq!(ring.level(4), 1);
//! assert_eq!(ring.location(4), Location::Left);
//!
//! ring.rotate(RotateDirection::Next, 1);
//! assert_eq!(ring.current(), 1);
//! assert_eq!(ring.location(0), Location::Left);
//! ```

use alloc::collections::VecDeque;

/// Where a page sits relative to the current page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Location {
    /// The current page, or a page the ring does not contain.
    #[default]
    Center,
    /// Slots before the current page.
    Left,
    /// Slots after the current page.
    Right,
}

/// Direction of a one-page rotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    /// Toward the page after the current one.
    Next,
    /// Toward the page before the current one.
    Previous,
}

impl RotateDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }
}

/// A circular window of page indices centered on the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ring {
    slots: VecDeque<usize>,
    current: usize,
    count: usize,
}

impl Ring {
    /// Builds a ring of `count` pages around `current`.
    ///
    /// `current` is clamped into `0..count`. A zero `count` yields an empty
    /// ring whose queries all return their neutral values.
    #[must_use]
    pub fn new(count: usize, current: usize) -> Self {
        let mut ring = Self {
            slots: VecDeque::new(),
            current: clamp_page(current, count),
            count,
        };
        ring.rebuild();
        ring
    }

    fn rebuild(&mut self) {
        self.slots.clear();
        if self.count == 0 {
            return;
        }
        self.slots.resize(self.count, 0);
        let center = self.center_index();
        self.slots[center] = self.current;

        let (mut left, mut right) = (self.current, self.current);
        for offset in 1..=center {
            left = self.previous(left);
            self.slots[center - offset] = left;
        }
        for slot in center + 1..self.count {
            right = self.next(right);
            self.slots[slot] = right;
        }
    }

    /// Number of pages in the ring.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The current page.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns `true` when the ring holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pages on each side of the center: `ceil(count / 2)`.
    ///
    /// This is also the z-index of the current page.
    #[must_use]
    pub fn side_count(&self) -> usize {
        self.count.div_ceil(2)
    }

    /// Slot holding the current page.
    #[must_use]
    pub fn center_index(&self) -> usize {
        self.side_count().min(self.count.saturating_sub(1))
    }

    /// Iterates the pages in slot order.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    /// Slot holding `page`.
    ///
    /// Slots always hold consecutive pages (wrapping) with the current page
    /// in the center slot, so this is arithmetic rather than a search.
    fn slot_of(&self, page: usize) -> Option<usize> {
        if page >= self.count {
            return None;
        }
        Some((page + self.count - self.current + self.center_index()) % self.count)
    }

    /// Returns `true` if `page` is a valid page of this ring.
    #[must_use]
    pub fn contains(&self, page: usize) -> bool {
        page < self.count
    }

    /// The page before `page`, wrapping to the last page.
    #[must_use]
    pub fn previous(&self, page: usize) -> usize {
        if self.count == 0 {
            return page;
        }
        match page.checked_sub(1) {
            Some(p) if p < self.count => p,
            _ => self.count - 1,
        }
    }

    /// The page after `page`, wrapping to the first page.
    #[must_use]
    pub fn next(&self, page: usize) -> usize {
        if page + 1 >= self.count { 0 } else { page + 1 }
    }

    /// The page in the slot before `page`'s slot, wrapping around the ring.
    ///
    /// Returns `page` unchanged if the ring does not contain it.
    #[must_use]
    pub fn previous_in_ring(&self, page: usize) -> usize {
        match self.slot_of(page) {
            Some(slot) => self.slots[(slot + self.count - 1) % self.count],
            None => page,
        }
    }

    /// The page in the slot after `page`'s slot, wrapping around the ring.
    ///
    /// Returns `page` unchanged if the ring does not contain it.
    #[must_use]
    pub fn next_in_ring(&self, page: usize) -> usize {
        match self.slot_of(page) {
            Some(slot) => self.slots[(slot + 1) % self.count],
            None => page,
        }
    }

    /// Slot distance between `page` and the current page.
    #[must_use]
    pub fn level(&self, page: usize) -> usize {
        self.level_from(page, self.current)
    }

    /// Slot distance between `page` and `current`.
    ///
    /// Returns `0` if either page is absent from the ring.
    #[must_use]
    pub fn level_from(&self, page: usize, current: usize) -> usize {
        match (self.slot_of(page), self.slot_of(current)) {
            (Some(slot), Some(center)) => slot.abs_diff(center),
            _ => 0,
        }
    }

    /// Stacking order of `page`: higher values are drawn in front.
    ///
    /// The current page has the largest z-index, [`side_count`](Self::side_count).
    #[must_use]
    pub fn z_index(&self, page: usize) -> isize {
        self.side_count() as isize - self.level(page) as isize
    }

    /// Where `page` sits relative to the current page.
    #[must_use]
    pub fn location(&self, page: usize) -> Location {
        match (self.slot_of(page), self.slot_of(self.current)) {
            (Some(slot), Some(center)) if slot < center => Location::Left,
            (Some(slot), Some(center)) if slot > center => Location::Right,
            _ => Location::Center,
        }
    }

    /// Returns `true` if `page`'s slot comes before `of`'s slot.
    #[must_use]
    pub fn is_before(&self, page: usize, of: usize) -> bool {
        match (self.slot_of(page), self.slot_of(of)) {
            (Some(slot), Some(other)) => slot < other,
            _ => false,
        }
    }

    /// Returns `true` if `page`'s slot comes after `of`'s slot.
    #[must_use]
    pub fn is_after(&self, page: usize, of: usize) -> bool {
        match (self.slot_of(page), self.slot_of(of)) {
            (Some(slot), Some(other)) => slot > other,
            _ => false,
        }
    }

    /// Rotates the ring `steps` slots toward `direction`.
    ///
    /// The slots shift cyclically and the page landing in the center slot
    /// becomes current. The cost is proportional to `steps`, not to `count`.
    pub fn rotate(&mut self, direction: RotateDirection, steps: usize) {
        if self.slots.is_empty() {
            return;
        }
        let steps = steps % self.count;
        match direction {
            RotateDirection::Next => self.slots.rotate_left(steps),
            RotateDirection::Previous => self.slots.rotate_right(steps),
        }
        if let Some(&current) = self.slots.get(self.center_index()) {
            self.current = current;
        }
    }

    /// Walks outward from the center one slot pair at a time.
    ///
    /// The visitor receives the page `n` slots to the left and `n` slots to
    /// the right of the center (`None` once a side runs out of slots) and
    /// returns `true` to stop. Iteration also ends after `ceil(count / 2)`
    /// pairs.
    pub fn un_center_iterate(&self, mut visitor: impl FnMut(Option<usize>, Option<usize>) -> bool) {
        if self.slots.is_empty() {
            return;
        }
        let center = self.center_index();
        for distance in 1..=self.side_count() {
            let left = center
                .checked_sub(distance)
                .and_then(|slot| self.slots.get(slot).copied());
            let right = self.slots.get(center + distance).copied();
            if visitor(left, right) {
                break;
            }
        }
    }

    /// Moves the current page to `current` (clamped) and rebuilds the ring.
    pub fn set_current(&mut self, current: usize) {
        self.current = clamp_page(current, self.count);
        self.rebuild();
    }

    /// Changes the page count, clamps the current page, and rebuilds the ring.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.current = clamp_page(self.current, count);
        self.rebuild();
    }
}

fn clamp_page(page: usize, count: usize) -> usize {
    page.min(count.saturating_sub(1))
}
