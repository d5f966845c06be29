// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: headless paging and virtualization for carousel views.
//!
//! This crate decides which pages of a carousel need a visual item, where each
//! item goes, how items are recycled, and how drags and programmatic steps
//! change the current page. It does not draw anything. A host toolkit
//! implements [`CarouselHost`] and owns the real views, keyed by [`ItemId`].
//!
//! Three presentation modes share one [`Carousel`] facade:
//!
//! - [`CarouselMode::Linear`]: horizontal paging, one item per page, laid out
//!   side by side at `page * (item_width + spacing)`.
//! - [`CarouselMode::CenterScale`]: the same paging, with neighbours shrinking
//!   by a fixed step per page of distance from the center.
//! - [`CarouselMode::Stack`]: a circular stack. Pages sit on a fixed ring of
//!   slots around the current page, shrink and offset by level, and rotate one
//!   step each time a drag crosses a break width.
//!
//! The core pieces are usable on their own:
//!
//! - [`Ring`]: the fixed-size cyclic window of page indices used by the stack.
//! - [`Recycler`]: the visible set and the reuse pool of items.
//! - [`PagedGeometry`] and [`StackGeometry`]: pure frame and scale math.
//! - [`drag::DragSession`]: the stack's drag state machine.
//!
//! ## Driving a carousel
//!
//! Hosts call [`Carousel::layout`] once their bounds are known and again on
//! every resize, feed gestures through [`Carousel::pan`], and report finished
//! animations through [`Carousel::complete_transition`]. Model state is
//! always updated synchronously; [`CarouselHost::animate`] only asks the host
//! to animate the presentation toward it.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_carousel::{
//!     Carousel, CarouselHost, CarouselMode, ItemId, ItemState, StackConfig, Transition,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     pending: Vec<Transition>,
//! }
//!
//! impl CarouselHost for Host {
//!     fn bounds(&self) -> Size {
//!         Size::new(320.0, 480.0)
//!     }
//!     fn create_item(&mut self, _id: ItemId, _page: usize, _frame: Rect) {}
//!     fn render(&mut self, _id: ItemId, _page: usize) {}
//!     fn prepare_for_reuse(&mut self, _id: ItemId) {}
//!     fn destroy_item(&mut self, _id: ItemId) {}
//!     fn apply(&mut self, _id: ItemId, _state: &ItemState) {}
//!     fn fade_in(&mut self, _id: ItemId, _duration: f64) {}
//!     fn fade_out(&mut self, _id: ItemId, _below: Option<ItemId>, _duration: f64) {}
//!     fn animate(&mut self, transition: Transition) {
//!         self.pending.push(transition);
//!     }
//! }
//!
//! let mut host = Host::default();
//! let mut carousel = Carousel::new(CarouselMode::Stack(StackConfig::simple()), 10, 0);
//! carousel.layout(&mut host);
//! assert!(carousel.visible_pages().contains(&0));
//!
//! // Stepping animates toward the neighbour slots, then rotates the ring.
//! carousel.loop_next_page(&mut host);
//! for transition in core::mem::take(&mut host.pending) {
//!     carousel.complete_transition(transition.id, true, &mut host);
//! }
//! assert_eq!(carousel.current_page(), 1);
//! ```
//!
//! Configuration values are clamped into range by [`Carousel::new`];
//! [`Carousel::try_new`] reports them as a [`ConfigError`] instead.
//!
//! With the `tracing` feature, item lifecycle, ring rotation, and transition
//! bookkeeping are emitted as `tracing` events.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "tracing")]
macro_rules! carousel_debug {
    ($($tt:tt)*) => { tracing::debug!($($tt)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! carousel_debug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! carousel_trace {
    ($($tt:tt)*) => { tracing::trace!($($tt)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! carousel_trace {
    ($($tt:tt)*) => {};
}

mod carousel;
mod config;
pub mod drag;
mod geometry;
mod host;
mod item;
mod mode;
mod observer;
mod recycler;
mod ring;
mod transition;

pub use carousel::Carousel;
pub use config::{
    Baseline, CarouselMode, CenterScaleConfig, ConfigError, Insets, ItemSize, LinearConfig,
    StackConfig,
};
pub use drag::{DragPhase, PanEvent, PanPhase};
pub use geometry::{
    PagedGeometry, SERIES_EPSILON, Side, StackGeometry, item_size, lerp_rect, level_scale,
    triangular_scale,
};
pub use host::{
    CarouselHost, FADE_DURATION, ItemTarget, SCROLL_DURATION, SETTLE_DURATION, Transition,
    TransitionId, TransitionTarget,
};
pub use item::{ItemId, ItemState};
pub use observer::Observers;
pub use recycler::{Acquired, Recycler};
pub use ring::{Location, Ring, RotateDirection};
