// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual item identity and per-item geometry state.

use kurbo::Rect;

/// Identity of a reusable visual item.
///
/// Ids are handed out by the recycler and stay attached to the same host view
/// for its whole life, across any number of page bindings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates an id from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Geometry and binding state of one visual item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemState {
    /// Bound page, or `None` while the item waits in the reuse pool.
    pub page: Option<usize>,
    /// Current frame.
    pub frame: Rect,
    /// Frame the item settles at once no gesture or animation moves it.
    ///
    /// Stack items rest at their discrete level scale; drags interpolate
    /// away from this frame and settling returns `frame` to it.
    pub rest_frame: Rect,
    /// Discrete scale for the item's distance from the current page.
    pub scale: f64,
    /// Scale actually applied; follows scrolling continuously.
    ///
    /// In center-scale mode `frame` is unscaled and hosts apply this scale
    /// about the frame's center. Stack frames are already scaled, so there it
    /// is informational.
    pub animated_scale: f64,
    /// Stacking order; higher values are drawn in front.
    pub z_index: isize,
    /// Whether the render hook already ran for the current binding.
    pub displayed: bool,
}

impl Default for ItemState {
    fn default() -> Self {
        Self {
            page: None,
            frame: Rect::ZERO,
            rest_frame: Rect::ZERO,
            scale: 1.0,
            animated_scale: 1.0,
            z_index: 0,
            displayed: false,
        }
    }
}

impl ItemState {
    pub(crate) fn bound(page: usize, frame: Rect) -> Self {
        Self {
            page: Some(page),
            frame,
            rest_frame: frame,
            ..Self::default()
        }
    }

    /// Clears the binding and geometry for the reuse pool.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
