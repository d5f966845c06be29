// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pending transition continuations.
//!
//! Each engine issues transitions on a small number of channels. A channel
//! holds at most one pending continuation: issuing again replaces it, so the
//! most recent request decides what happens when the animation settles. A
//! completion for a replaced id finds nothing and does nothing.

use smallvec::SmallVec;

use crate::host::TransitionId;

/// What a transition animates, for replacement purposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Channel {
    Items,
    Scroll,
}

#[derive(Clone, Debug)]
struct Pending<C> {
    channel: Channel,
    id: TransitionId,
    then: Option<C>,
}

/// Table of pending continuations, one per channel.
#[derive(Clone, Debug)]
pub(crate) struct Transitions<C> {
    next: u64,
    pending: SmallVec<[Pending<C>; 2]>,
}

impl<C> Default for Transitions<C> {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl<C> Transitions<C> {
    /// Creates an empty table whose first id is `next`.
    pub(crate) fn starting_at(next: u64) -> Self {
        Self {
            next,
            pending: SmallVec::new(),
        }
    }

    /// Raw value the next issued id will have.
    pub(crate) fn next_raw(&self) -> u64 {
        self.next
    }

    /// Allocates an id on `channel`, replacing whatever was pending there.
    pub(crate) fn issue(&mut self, channel: Channel, then: Option<C>) -> TransitionId {
        let id = TransitionId::new(self.next);
        self.next += 1;
        self.cancel(channel);
        self.pending.push(Pending { channel, id, then });
        id
    }

    /// Removes the entry for `id`.
    ///
    /// Returns `None` if `id` was replaced or never issued, and `Some(None)`
    /// for a live transition without a continuation.
    pub(crate) fn take(&mut self, id: TransitionId) -> Option<Option<C>> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(index).then)
    }

    /// Removes whatever is pending on `channel`.
    ///
    /// Returns `None` if nothing was pending, and `Some(None)` for a pending
    /// transition without a continuation.
    pub(crate) fn take_channel(&mut self, channel: Channel) -> Option<Option<C>> {
        let index = self.pending.iter().position(|p| p.channel == channel)?;
        Some(self.pending.remove(index).then)
    }

    /// Drops whatever is pending on `channel`.
    pub(crate) fn cancel(&mut self, channel: Channel) {
        self.pending.retain(|p| p.channel != channel);
    }

    /// Returns `true` if something is pending on `channel`.
    pub(crate) fn is_pending(&self, channel: Channel) -> bool {
        self.pending.iter().any(|p| p.channel == channel)
    }
}
