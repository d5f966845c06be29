// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mode engines behind [`Carousel`](crate::Carousel).
//!
//! [`PagedPager`] drives both horizontal paging modes; [`StackPager`] drives
//! the circular stack. Each engine owns its recycler, observers, and pending
//! transitions, and receives the host on every call.

mod paged;
mod stack;

pub(crate) use paged::PagedPager;
pub(crate) use stack::StackPager;

use alloc::vec::Vec;

use crate::host::{CarouselHost, ItemTarget, Transition, TransitionId, TransitionTarget};
use crate::transition::{Channel, Transitions};

/// Issues an `Items` transition and hands it to the host.
fn animate_items<C, H: CarouselHost + ?Sized>(
    transitions: &mut Transitions<C>,
    then: Option<C>,
    targets: Vec<ItemTarget>,
    duration: f64,
    host: &mut H,
) -> TransitionId {
    let id = transitions.issue(Channel::Items, then);
    carousel_trace!(id = id.get(), items = targets.len(), "animate items");
    host.animate(Transition {
        id,
        duration,
        target: TransitionTarget::Items(targets),
    });
    id
}
