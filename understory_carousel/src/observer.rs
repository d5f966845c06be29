// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll and page-change observer callbacks.

use alloc::boxed::Box;
use core::fmt;

type ScrollFn = Box<dyn FnMut()>;
type ProgressFn = Box<dyn FnMut(f64)>;
type PageChangeFn = Box<dyn FnMut(usize, usize)>;

/// The callbacks a carousel engine notifies.
///
/// Every slot is optional. Engines own their observers; the
/// [`Carousel`](crate::Carousel) facade moves them to the new engine when the
/// mode changes.
#[derive(Default)]
pub struct Observers {
    begin: Option<ScrollFn>,
    change: Option<ProgressFn>,
    end: Option<ScrollFn>,
    page_change: Option<PageChangeFn>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("begin", &self.begin.is_some())
            .field("change", &self.change.is_some())
            .field("end", &self.end.is_some())
            .field("page_change", &self.page_change.is_some())
            .finish()
    }
}

impl Observers {
    /// Sets the callback fired when a scroll or drag begins.
    pub fn set_begin(&mut self, f: impl FnMut() + 'static) {
        self.begin = Some(Box::new(f));
    }

    /// Sets the callback fired with the progress toward the neighbouring page.
    pub fn set_change(&mut self, f: impl FnMut(f64) + 'static) {
        self.change = Some(Box::new(f));
    }

    /// Sets the callback fired when a scroll or drag ends.
    pub fn set_end(&mut self, f: impl FnMut() + 'static) {
        self.end = Some(Box::new(f));
    }

    /// Sets the callback fired with `(old, new)` once per committed page change.
    pub fn set_page_change(&mut self, f: impl FnMut(usize, usize) + 'static) {
        self.page_change = Some(Box::new(f));
    }

    pub(crate) fn begin(&mut self) {
        if let Some(f) = self.begin.as_mut() {
            f();
        }
    }

    pub(crate) fn change(&mut self, progress: f64) {
        if let Some(f) = self.change.as_mut() {
            f(progress);
        }
    }

    pub(crate) fn end(&mut self) {
        if let Some(f) = self.end.as_mut() {
            f();
        }
    }

    /// Fires the page-change callback unless `old == new`.
    pub(crate) fn page_change(&mut self, old: usize, new: usize) {
        if old == new {
            return;
        }
        carousel_debug!(old, new, "page change");
        if let Some(f) = self.page_change.as_mut() {
            f(old, new);
        }
    }
}
