// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: turn cumulative pan translations into page steps.
//!
//! ## Usage
//!
//! 1) Call [`DragSession::begin`] when the pan gesture begins.
//! 2) On each change, call [`DragSession::update`] with the cumulative
//!    translation and the break width. The returned [`StepUpdate`] says how far
//!    items should be interpolated toward their neighbours and whether a
//!    one-page rotation must be committed now.
//! 3) Call [`DragSession::end`] when the gesture ends or is cancelled.
//!
//! A rotation commits whenever the signed whole number of break widths
//! dragged changes. Dragging left (negative `x`) rotates toward the next page.
//! Crossing back over a boundary without releasing reverses the direction, so
//! the rotation that fires undoes the previous one instead of repeating it.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use understory_carousel::RotateDirection;
//! use understory_carousel::drag::DragSession;
//!
//! let mut drag = DragSession::default();
//! drag.begin();
//!
//! // Half a break width to the left: interpolate, no commit.
//! let update = drag.update(Vec2::new(-25.0, 0.0), 50.0);
//! assert_eq!(update.direction, RotateDirection::Next);
//! assert_eq!(update.progress, 0.5);
//! assert!(!update.commit);
//!
//! // Past one break width: commit one rotation toward the next page.
//! assert!(drag.update(Vec2::new(-55.0, 0.0), 50.0).commit);
//!
//! // Back across the boundary: commit the opposite rotation.
//! let back = drag.update(Vec2::new(-45.0, 0.0), 50.0);
//! assert!(back.commit);
//! assert_eq!(back.direction, RotateDirection::Previous);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`, `abs`
use kurbo::Vec2;

use crate::ring::RotateDirection;

/// Phase of a pan gesture as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanPhase {
    /// The gesture started.
    Began,
    /// The translation changed.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The gesture was cancelled.
    Cancelled,
}

/// One pan gesture sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanEvent {
    /// Where the gesture is in its lifecycle.
    pub phase: PanPhase,
    /// Translation since the gesture began.
    pub translation: Vec2,
}

impl PanEvent {
    /// Creates a sample.
    #[must_use]
    pub const fn new(phase: PanPhase, translation: Vec2) -> Self {
        Self { phase, translation }
    }

    /// A `Began` sample with zero translation.
    #[must_use]
    pub const fn began() -> Self {
        Self::new(PanPhase::Began, Vec2::ZERO)
    }

    /// A `Changed` sample.
    #[must_use]
    pub const fn changed(translation: Vec2) -> Self {
        Self::new(PanPhase::Changed, translation)
    }

    /// An `Ended` sample.
    #[must_use]
    pub const fn ended(translation: Vec2) -> Self {
        Self::new(PanPhase::Ended, translation)
    }
}

/// Where a drag session is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The gesture began; no translation seen yet.
    Started,
    /// Items are following the finger between two pages.
    Changing,
    /// The last update crossed a step boundary and committed a rotation.
    Rotating,
}

/// Result of feeding one translation into a [`DragSession`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepUpdate {
    /// Fraction of the way to the neighbouring page, in `[0, 1)`.
    pub progress: f64,
    /// Which neighbour items move toward, and which way a commit rotates.
    pub direction: RotateDirection,
    /// Whether a step boundary was crossed and one rotation must commit.
    pub commit: bool,
}

/// Transient state of one pan gesture over the stack.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragSession {
    offset: Vec2,
    rotate_step: i64,
    old_rotate_step: i64,
    phase: DragPhase,
}

impl DragSession {
    /// Starts a new gesture, forgetting any previous one.
    pub fn begin(&mut self) {
        *self = Self {
            phase: DragPhase::Started,
            ..Self::default()
        };
    }

    /// Feeds the cumulative translation of the gesture.
    ///
    /// A non-positive or non-finite `break_width` never commits and reports
    /// zero progress.
    pub fn update(&mut self, translation: Vec2, break_width: f64) -> StepUpdate {
        self.offset = translation;
        let step = if break_width > 0.0 && break_width.is_finite() {
            translation.x / break_width
        } else {
            0.0
        };
        let whole = step.abs().floor();
        let progress = if whole.is_finite() { step.abs() - whole } else { 0.0 };

        self.old_rotate_step = self.rotate_step;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "whole is a non-negative integral value; saturates for absurd drags"
        )]
        let whole = whole as i64;
        self.rotate_step = if step > 0.0 {
            whole
        } else {
            -whole
        };

        let changed_direction = self.old_rotate_step.abs() > self.rotate_step.abs();
        let toward = if self.offset.x < 0.0 {
            RotateDirection::Next
        } else {
            RotateDirection::Previous
        };
        let direction = if changed_direction {
            toward.reversed()
        } else {
            toward
        };

        let commit = self.old_rotate_step != self.rotate_step;
        self.phase = if commit {
            DragPhase::Rotating
        } else {
            DragPhase::Changing
        };
        StepUpdate {
            progress,
            direction,
            commit,
        }
    }

    /// Ends the gesture and returns to [`DragPhase::Idle`].
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` between [`begin`](Self::begin) and [`end`](Self::end).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Last translation fed to [`update`](Self::update).
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Signed whole number of break widths dragged so far.
    #[must_use]
    pub fn rotate_step(&self) -> i64 {
        self.rotate_step
    }
}
