// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability surface a host toolkit provides to the carousel.
//!
//! The carousel never owns views. It decides which pages need an item, where
//! each item goes, and when something should animate, and calls into a
//! [`CarouselHost`] to make it happen. Hosts map [`ItemId`]s to their own view
//! objects.
//!
//! Animations are fire-and-forget: [`CarouselHost::animate`] hands over a
//! [`Transition`], and the host later reports the outcome through
//! [`Carousel::complete_transition`](crate::Carousel::complete_transition).
//! Model values (the [`ItemState`] frames) already hold the targets when
//! `animate` is called; the host only animates the presentation.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::item::{ItemId, ItemState};

/// Opacity fade duration for items entering or leaving the visible set, in seconds.
pub const FADE_DURATION: f64 = 0.2;

/// Duration of frame transitions (settling, programmatic stack steps), in seconds.
pub const SETTLE_DURATION: f64 = 0.2;

/// Duration of animated scrolls in the paged modes, in seconds.
pub const SCROLL_DURATION: f64 = 0.3;

/// Identity of an issued transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl TransitionId {
    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Target geometry of one item in an animated transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemTarget {
    /// The item to animate.
    pub id: ItemId,
    /// Target frame.
    pub frame: Rect,
    /// Target applied scale.
    pub scale: f64,
}

/// What an animated transition changes.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionTarget {
    /// Animate items to new frames and scales.
    Items(Vec<ItemTarget>),
    /// Animate the viewport of a paged mode.
    ///
    /// The carousel's scroll offset is already `to` when this is issued; the
    /// host only animates its own viewport. Offsets the user drives, such as
    /// deceleration after a fling, still go through
    /// [`Carousel::set_scroll_offset`](crate::Carousel::set_scroll_offset).
    Scroll {
        /// Offset at the start of the animation.
        from: f64,
        /// Offset at the end of the animation.
        to: f64,
    },
}

/// An animated change the host should perform.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Pass back to [`Carousel::complete_transition`](crate::Carousel::complete_transition).
    pub id: TransitionId,
    /// Duration in seconds.
    pub duration: f64,
    /// What to animate.
    pub target: TransitionTarget,
}

/// Host toolkit integration for a [`Carousel`](crate::Carousel).
pub trait CarouselHost {
    /// Current size of the carousel's bounds.
    fn bounds(&self) -> Size;

    /// Creates a new visual item bound to `page` at `frame`.
    fn create_item(&mut self, id: ItemId, page: usize, frame: Rect);

    /// Renders `page`'s content into the item.
    ///
    /// Called at most once per binding.
    fn render(&mut self, id: ItemId, page: usize);

    /// Resets the item before it enters the reuse pool.
    fn prepare_for_reuse(&mut self, id: ItemId);

    /// Destroys an item; the id is never used again.
    fn destroy_item(&mut self, id: ItemId);

    /// Applies the item's frame, scale, and z-index immediately.
    fn apply(&mut self, id: ItemId, state: &ItemState);

    /// Fades the item in from transparent.
    fn fade_in(&mut self, id: ItemId, duration: f64);

    /// Fades out a snapshot of the item so the live item can be reused at once.
    ///
    /// When `below` is set, the snapshot belongs directly under that item in
    /// draw order. When the host cannot snapshot, it may skip the fade.
    fn fade_out(&mut self, id: ItemId, below: Option<ItemId>, duration: f64);

    /// Starts an animated transition.
    fn animate(&mut self, transition: Transition);
}
