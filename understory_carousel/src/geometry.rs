// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure geometry for the three carousel modes.
//!
//! Every function here maps configuration, container size, and page position
//! to frames and scale factors. Nothing here touches item state; the engines
//! in [`crate::mode`] call these and store the results.
//!
//! Frames are in the coordinate space of the scroll container for the paged
//! modes, and of the carousel bounds for the stack mode.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`, `round`
use kurbo::{Rect, Size};

use crate::config::{Baseline, CenterScaleConfig, Insets, ItemSize, LinearConfig, StackConfig};
use crate::ring::Location;

/// Terms of the stack's compress series stop once they fall below this width.
pub const SERIES_EPSILON: f64 = 1e-4;

/// Linearly interpolates origin and size between two frames.
///
/// `progress` is clamped to `[0, 1]`; `0` yields `from` and `1` yields `to`.
#[must_use]
pub fn lerp_rect(from: Rect, to: Rect, progress: f64) -> Rect {
    let t = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let lerp = |a: f64, b: f64| a + (b - a) * t;
    Rect::from_origin_size(
        (lerp(from.x0, to.x0), lerp(from.y0, to.y0)),
        (lerp(from.width(), to.width()), lerp(from.height(), to.height())),
    )
}

/// Content size of an item: the resolved size minus the insets on both sides.
#[must_use]
pub fn item_size(size: ItemSize, insets: Insets, container: Size) -> Size {
    let resolved = size.resolve(container);
    Size::new(
        (resolved.width - insets.horizontal * 2.0).max(0.0),
        (resolved.height - insets.vertical * 2.0).max(0.0),
    )
}

/// Scale of an item `level` steps away from the current page, clamped to `[0, 1]`.
#[must_use]
pub fn level_scale(level: usize, scale_step: f64) -> f64 {
    (1.0 - scale_step * level as f64).clamp(0.0, 1.0)
}

/// Triangular falloff: `1` at zero offset, `0` once `|offset| >= distance`.
///
/// An infinite `distance` yields `1` everywhere; a non-positive one yields `0`.
#[must_use]
pub fn triangular_scale(offset: f64, distance: f64) -> f64 {
    if distance.is_nan() || distance <= 0.0 {
        return 0.0;
    }
    (1.0 - (offset / distance).abs()).clamp(0.0, 1.0)
}

/// Which edge of the visible rectangle an item is tested against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The item sits before the current page.
    Left,
    /// The item is the current page or sits after it.
    Right,
}

/// Paging geometry shared by the flat and centered-scale modes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PagedGeometry {
    /// Page by the container width instead of the item width.
    pub fill_page: bool,
    /// Item size policy.
    pub size: ItemSize,
    /// Gap between neighbouring items.
    pub spacing: f64,
    /// Content insets.
    pub insets: Insets,
}

impl From<&LinearConfig> for PagedGeometry {
    fn from(config: &LinearConfig) -> Self {
        Self {
            fill_page: config.fill_page,
            size: config.size,
            spacing: config.spacing,
            insets: config.insets,
        }
    }
}

impl From<&CenterScaleConfig> for PagedGeometry {
    fn from(config: &CenterScaleConfig) -> Self {
        Self {
            fill_page: false,
            size: config.size,
            spacing: config.spacing,
            insets: config.insets,
        }
    }
}

impl PagedGeometry {
    /// The scroll container: the bounds widened by one spacing.
    ///
    /// The container's origin sits at `-spacing / 2` in the carousel's space.
    #[must_use]
    pub fn container(&self, bounds: Size) -> Size {
        Size::new(bounds.width + self.spacing, bounds.height)
    }

    /// Item content size inside `container`.
    #[must_use]
    pub fn item_size(&self, container: Size) -> Size {
        item_size(self.size, self.insets, container)
    }

    /// Horizontal distance between neighbouring pages.
    #[must_use]
    pub fn page_step(&self, container: Size) -> f64 {
        let width = if self.fill_page {
            container.width
        } else {
            self.item_size(container).width
        };
        width + self.spacing
    }

    /// Frame of `page` inside the scroll content.
    #[must_use]
    pub fn item_frame(&self, page: usize, container: Size) -> Rect {
        let item = self.item_size(container);
        let x = page as f64 * self.page_step(container)
            + (container.width - item.width) * 0.5
            + self.spacing * 0.5;
        let y = (container.height - item.height) * 0.5;
        Rect::from_origin_size((x, y), item)
    }

    /// Scroll offset that centers `page`.
    #[must_use]
    pub fn scroll_offset(&self, page: usize, container: Size) -> f64 {
        self.spacing * 0.5 + self.page_step(container) * page as f64
    }

    /// Total scrollable extent for `count` pages.
    #[must_use]
    pub fn content_extent(&self, count: usize, container: Size) -> f64 {
        self.item_frame(0, container).x0 + self.page_step(container) * count as f64
    }

    /// Page nearest to `offset` and the fractional progress toward the next page.
    ///
    /// The page is clamped to `0..count`; progress is clamped to `[0, 1]`.
    #[must_use]
    pub fn page_at(&self, offset: f64, count: usize, container: Size) -> (usize, f64) {
        let step = self.page_step(container);
        if count == 0 || !(step > 0.0) {
            return (0, 0.0);
        }
        let position = offset / step;
        let last = (count - 1) as f64;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to a valid page index before the cast"
        )]
        let page = position.round().clamp(0.0, last) as usize;
        let progress = (position - position.floor()).clamp(0.0, 1.0);
        (page, progress)
    }

    /// Viewport-sized rectangle centered on `current`'s frame.
    #[must_use]
    pub fn visible_rect(&self, current: usize, container: Size) -> Rect {
        let frame = self.item_frame(current, container);
        let x = frame.x0 - (container.width - frame.width()) * 0.5;
        Rect::from_origin_size((x, 0.0), container)
    }

    /// Whether an item still reaches into the visible rectangle from `side`.
    ///
    /// Left items must end at or after the rectangle's left edge; right items
    /// must start at or before its right edge.
    #[must_use]
    pub fn reaches(frame: Rect, side: Side, visible: Rect) -> bool {
        match side {
            Side::Left => frame.x1 >= visible.x0,
            Side::Right => frame.x0 <= visible.x1,
        }
    }

    /// Half-width of the triangular falloff used by the centered-scale mode.
    ///
    /// This is the distance at which an item's animated scale reaches zero:
    /// one page step divided by the scale step.
    #[must_use]
    pub fn falloff_distance(&self, scale_step: f64, container: Size) -> f64 {
        let distance = (self.item_frame(1, container).center().x
            - self.item_frame(0, container).center().x)
            .abs();
        distance / scale_step
    }
}

/// Stack-mode geometry for one configuration and bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StackGeometry {
    config: StackConfig,
    bounds: Size,
    item: Size,
}

impl StackGeometry {
    /// Captures the geometry inputs for a layout pass.
    #[must_use]
    pub fn new(config: &StackConfig, bounds: Size) -> Self {
        Self {
            config: *config,
            bounds,
            item: item_size(config.size, config.insets, bounds),
        }
    }

    /// Item content size.
    #[must_use]
    pub fn item_size(&self) -> Size {
        self.item
    }

    /// Drag distance that commits a one-page rotation.
    #[must_use]
    pub fn break_width(&self) -> f64 {
        self.config
            .break_width
            .unwrap_or(self.item.width * 0.5)
    }

    /// Horizontal displacement of an item `level` slots from the center.
    ///
    /// With `scale_offsets`, each level contributes `offset_step * width`
    /// shrunk by that level's scale; otherwise every level contributes the
    /// full amount.
    #[must_use]
    pub fn level_offset(&self, level: usize) -> f64 {
        let offset = self.config.offset_step * self.item.width;
        if self.config.scale_offsets {
            (1..=level)
                .map(|l| level_scale(l, self.config.scale_step) * offset)
                .sum()
        } else {
            level as f64 * offset
        }
    }

    /// Unscaled frame of an item at `level` on `location`'s side.
    #[must_use]
    pub fn origin_frame(&self, level: usize, location: Location) -> Rect {
        let centered = (self.bounds.width - self.item.width) * 0.5;
        let offset = self.level_offset(level);
        let x = match location {
            Location::Center => centered,
            Location::Left => centered - offset,
            Location::Right => centered + offset,
        };
        let y = (self.bounds.height - self.item.height) * 0.5;
        Rect::from_origin_size((x, y), self.item)
    }

    /// Scales `origin` by `scale`, anchoring it according to its location and the baseline.
    ///
    /// Left items keep their left edge and right items keep their right edge.
    /// Off-center items shift vertically by none, half, or all of the height
    /// lost to scaling for a top, center, or bottom baseline.
    #[must_use]
    pub fn scaled_frame(&self, origin: Rect, location: Location, scale: f64) -> Rect {
        let size = Size::new(origin.width() * scale, origin.height() * scale);
        let dx = (origin.width() - size.width).abs();
        let dy = (origin.height() - size.height).abs();
        let dy = match self.config.baseline {
            Baseline::Top => 0.0,
            Baseline::Center => dy * 0.5,
            Baseline::Bottom => dy,
        };
        let (x, y) = match location {
            Location::Center => (origin.x0, origin.y0),
            Location::Left => (origin.x0, origin.y0 + dy),
            Location::Right => (origin.x0 + dx, origin.y0 + dy),
        };
        Rect::from_origin_size((x, y), size)
    }

    /// Frame of an item at `level` on `location`'s side, drawn at `scale`.
    #[must_use]
    pub fn frame(&self, level: usize, location: Location, scale: f64) -> Rect {
        self.scaled_frame(self.origin_frame(level, location), location, scale)
    }

    /// Resting frame: the item drawn at its discrete level scale.
    #[must_use]
    pub fn rest_frame(&self, level: usize, location: Location) -> Rect {
        self.frame(level, location, level_scale(level, self.config.scale_step))
    }

    /// The rectangle the whole stack is compressed into.
    ///
    /// Centered on the bounds, as wide as one item plus the displacement of
    /// every level on both sides. With `scale_offsets` that displacement is
    /// the converging series `w + w*s + w*s^2 + ...`. A scale step outside
    /// `[0, 1)` does not converge and falls back to `side_count` full offsets.
    #[must_use]
    pub fn compress_rect(&self, side_count: usize) -> Rect {
        let offset = self.config.offset_step * self.item.width;
        let converges = (0.0..1.0).contains(&self.config.scale_step);
        let offsets = if self.config.scale_offsets && converges {
            let mut total = 0.0;
            let mut term = offset;
            while term > SERIES_EPSILON {
                total += term;
                term *= self.config.scale_step;
            }
            total
        } else {
            side_count as f64 * offset
        };
        let width = self.item.width + offsets * 2.0;
        let x = self.bounds.width * 0.5 - width * 0.5;
        Rect::new(x, 0.0, x + width, self.bounds.height)
    }

    /// Bounds-sized rectangle centered on the current page's frame.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        let frame = self.origin_frame(0, Location::Center);
        let x = frame.x0 - (self.bounds.width - frame.width()) * 0.5;
        Rect::from_origin_size((x, 0.0), self.bounds)
    }

    /// Whether an item lies fully inside the visible rectangle on `side`.
    #[must_use]
    pub fn fits(frame: Rect, side: Side, visible: Rect) -> bool {
        match side {
            Side::Left => frame.x0 >= visible.x0,
            Side::Right => frame.x1 <= visible.x1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Size = Size::new(300.0, 400.0);

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn lerp_endpoints_round_trip() {
        let from = Rect::new(0.0, 0.0, 10.0, 20.0);
        let to = Rect::new(100.0, 50.0, 150.0, 70.0);
        assert_eq!(lerp_rect(from, to, 0.0), from);
        assert_eq!(lerp_rect(from, to, 1.0), to);
        assert_eq!(lerp_rect(from, to, 7.0), to);
        assert_eq!(lerp_rect(from, to, -1.0), from);

        let mid = lerp_rect(from, to, 0.5);
        assert_eq!(mid, Rect::new(50.0, 25.0, 80.0, 45.0));
    }

    #[test]
    fn level_scale_clamps() {
        assert_eq!(level_scale(0, 0.3), 1.0);
        assert!(approx(level_scale(2, 0.3), 0.4));
        assert_eq!(level_scale(5, 0.3), 0.0);
    }

    #[test]
    fn triangular_scale_falls_off_linearly() {
        assert_eq!(triangular_scale(0.0, 100.0), 1.0);
        assert_eq!(triangular_scale(-50.0, 100.0), 0.5);
        assert_eq!(triangular_scale(250.0, 100.0), 0.0);
        assert_eq!(triangular_scale(40.0, f64::INFINITY), 1.0);
        assert_eq!(triangular_scale(0.0, 0.0), 0.0);
    }

    #[test]
    fn filled_pages_step_by_container() {
        let geometry = PagedGeometry::from(&LinearConfig::simple().with_spacing(10.0));
        let container = geometry.container(BOUNDS);
        assert_eq!(container, Size::new(310.0, 400.0));

        assert_eq!(geometry.item_frame(0, container), Rect::new(5.0, 0.0, 315.0, 400.0));
        assert_eq!(geometry.item_frame(2, container).x0, 2.0 * 320.0 + 5.0);
        assert_eq!(geometry.scroll_offset(2, container), 645.0);
        assert_eq!(geometry.page_at(645.0, 5, container).0, 2);
    }

    #[test]
    fn unfilled_pages_step_by_item() {
        let config = LinearConfig::simple_unfilled()
            .with_size(ItemSize::Custom(Size::new(200.0, 300.0)))
            .with_spacing(20.0);
        let geometry = PagedGeometry::from(&config);
        let container = geometry.container(BOUNDS);

        assert_eq!(geometry.page_step(container), 220.0);
        let frame = geometry.item_frame(1, container);
        assert_eq!(frame, Rect::new(220.0 + 60.0 + 10.0, 50.0, 220.0 + 60.0 + 10.0 + 200.0, 350.0));

        let visible = geometry.visible_rect(1, container);
        assert_eq!(visible.width(), container.width);
        assert!(approx(visible.center().x, frame.center().x));
    }

    #[test]
    fn page_at_clamps_and_reports_fraction() {
        let geometry = PagedGeometry::from(&LinearConfig::simple());
        let container = geometry.container(BOUNDS);
        assert_eq!(geometry.page_at(-500.0, 4, container).0, 0);
        assert_eq!(geometry.page_at(99_999.0, 4, container).0, 3);

        let (page, progress) = geometry.page_at(300.0 * 1.25, 4, container);
        assert_eq!(page, 1);
        assert!(approx(progress, 0.25));
        assert_eq!(geometry.page_at(10.0, 0, container), (0, 0.0));
    }

    #[test]
    fn reaches_tests_outward_edge() {
        let visible = Rect::new(100.0, 0.0, 400.0, 10.0);
        let left = Rect::new(0.0, 0.0, 100.0, 10.0);
        let right = Rect::new(400.0, 0.0, 500.0, 10.0);
        assert!(PagedGeometry::reaches(left, Side::Left, visible));
        assert!(PagedGeometry::reaches(right, Side::Right, visible));
        assert!(!PagedGeometry::reaches(left - kurbo::Vec2::new(1.0, 0.0), Side::Left, visible));
        assert!(!PagedGeometry::reaches(right + kurbo::Vec2::new(1.0, 0.0), Side::Right, visible));
    }

    #[test]
    fn falloff_distance_is_step_over_scale() {
        let config = CenterScaleConfig::simple()
            .with_size(ItemSize::Square(200.0))
            .with_spacing(10.0)
            .with_scale_step(0.5);
        let geometry = PagedGeometry::from(&config);
        let container = geometry.container(BOUNDS);
        assert!(approx(geometry.falloff_distance(0.5, container), 420.0));
        assert_eq!(geometry.falloff_distance(0.0, container), f64::INFINITY);
    }

    #[test]
    fn stack_offsets_compound_with_scale() {
        let config = StackConfig::simple()
            .with_size(ItemSize::Custom(Size::new(200.0, 300.0)))
            .with_scale_step(0.5)
            .with_offset_step(0.1);
        let geometry = StackGeometry::new(&config, BOUNDS);
        // Each level contributes 20 * scale(level).
        assert_eq!(geometry.level_offset(0), 0.0);
        assert!(approx(geometry.level_offset(1), 10.0));
        assert!(approx(geometry.level_offset(2), 10.0));

        let flat = StackGeometry::new(&config.with_scale_offsets(false), BOUNDS);
        assert!(approx(flat.level_offset(3), 60.0));
    }

    #[test]
    fn stack_origin_frames_spread_outward() {
        let config = StackConfig::simple()
            .with_size(ItemSize::Custom(Size::new(200.0, 300.0)))
            .with_scale_offsets(false);
        let geometry = StackGeometry::new(&config, BOUNDS);
        let center = geometry.origin_frame(0, Location::Center);
        assert_eq!(center, Rect::new(50.0, 50.0, 250.0, 350.0));
        assert!(approx(geometry.origin_frame(1, Location::Left).x0, 20.0));
        assert!(approx(geometry.origin_frame(1, Location::Right).x0, 80.0));
    }

    #[test]
    fn scaled_frames_follow_baseline() {
        let origin = Rect::new(100.0, 100.0, 200.0, 300.0);
        let config = StackConfig::simple();
        for (baseline, dy) in [
            (Baseline::Top, 0.0),
            (Baseline::Center, 50.0),
            (Baseline::Bottom, 100.0),
        ] {
            let geometry = StackGeometry::new(&config.with_baseline(baseline), BOUNDS);
            let left = geometry.scaled_frame(origin, Location::Left, 0.5);
            assert_eq!(left, Rect::new(100.0, 100.0 + dy, 150.0, 200.0 + dy));
            let right = geometry.scaled_frame(origin, Location::Right, 0.5);
            assert_eq!(right, Rect::new(150.0, 100.0 + dy, 200.0, 200.0 + dy));
        }
        let geometry = StackGeometry::new(&config, BOUNDS);
        let center = geometry.scaled_frame(origin, Location::Center, 0.5);
        assert_eq!(center, Rect::new(100.0, 100.0, 150.0, 200.0));
    }

    #[test]
    fn compress_rect_sums_converging_series() {
        let config = StackConfig::simple()
            .with_size(ItemSize::Custom(Size::new(200.0, 300.0)))
            .with_scale_step(0.5)
            .with_offset_step(0.1);
        let geometry = StackGeometry::new(&config, BOUNDS);
        // 20 + 10 + 5 + ... converges to 40 on each side.
        let rect = geometry.compress_rect(3);
        assert!((rect.width() - 280.0).abs() < 1e-3);
        assert!(approx(rect.center().x, 150.0));

        let flat = StackGeometry::new(&config.with_scale_offsets(false), BOUNDS);
        assert!(approx(flat.compress_rect(3).width(), 320.0));
    }

    #[test]
    fn compress_rect_with_divergent_scale_step_uses_full_offsets() {
        let config = StackConfig::simple()
            .with_size(ItemSize::Custom(Size::new(200.0, 300.0)))
            .with_offset_step(0.1);
        for scale_step in [1.0, 1.5, f64::NAN] {
            let geometry = StackGeometry::new(&config.with_scale_step(scale_step), BOUNDS);
            // Three levels of 20 on each side.
            assert!(approx(geometry.compress_rect(3).width(), 320.0));
        }
    }

    #[test]
    fn stack_break_width_defaults_to_half_item() {
        let config = StackConfig::simple().with_size(ItemSize::Square(120.0));
        assert_eq!(StackGeometry::new(&config, BOUNDS).break_width(), 60.0);
        let explicit = config.with_break_width(Some(33.0));
        assert_eq!(StackGeometry::new(&explicit, BOUNDS).break_width(), 33.0);
    }
}
