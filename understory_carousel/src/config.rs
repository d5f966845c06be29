// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-mode configuration values.
//!
//! Each carousel mode has its own configuration type. They are plain value
//! objects: construct one with [`Default`] or a named preset, adjust it with
//! the `with_*` builders, and hand it to [`CarouselMode`].
//!
//! The engines never fail on odd values. [`CarouselMode::validate`] reports
//! the first out-of-range field for callers that want to catch mistakes early,
//! and [`CarouselMode::normalized`] clamps every field into range (this is what
//! [`Carousel::new`](crate::Carousel::new) does).

use kurbo::Size;

/// How large an item is relative to its container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSize {
    /// The item fills the container.
    #[default]
    Unspecified,
    /// A square of the given side, shrunk to fit the container.
    Square(f64),
    /// An explicit size, shrunk per axis to fit the container.
    Custom(Size),
}

impl ItemSize {
    /// Resolves this policy against a container size.
    #[must_use]
    pub fn resolve(self, bounds: Size) -> Size {
        match self {
            Self::Unspecified => bounds,
            Self::Square(side) => {
                let side = side.min(bounds.width).min(bounds.height);
                Size::new(side, side)
            }
            Self::Custom(size) => Size::new(
                size.width.min(bounds.width),
                size.height.min(bounds.height),
            ),
        }
    }
}

/// Symmetric content insets applied inside the resolved item size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// Inset applied to both the left and right edge.
    pub horizontal: f64,
    /// Inset applied to both the top and bottom edge.
    pub vertical: f64,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates insets from a horizontal and vertical amount.
    #[must_use]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Creates insets with the same amount on both axes.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value)
    }
}

/// Vertical anchor for scaled, off-center items in the stack mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Baseline {
    /// Scaled items keep their top edge.
    Top,
    /// Scaled items stay vertically centered.
    Center,
    /// Scaled items keep their bottom edge.
    #[default]
    Bottom,
}

/// Error returned by configuration validation.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The per-level scale step must lie in `[0, 1)`.
    #[error("scale step {0} must lie in [0, 1)")]
    ScaleStep(f64),
    /// The per-level offset step must be finite and non-negative.
    #[error("offset step {0} must be finite and non-negative")]
    OffsetStep(f64),
    /// Inter-item spacing must be finite and non-negative.
    #[error("spacing {0} must be finite and non-negative")]
    Spacing(f64),
    /// Insets must be finite and non-negative on both axes.
    #[error("insets {horizontal}x{vertical} must be finite and non-negative")]
    Insets {
        /// The rejected horizontal inset.
        horizontal: f64,
        /// The rejected vertical inset.
        vertical: f64,
    },
    /// An explicit break width must be finite and positive.
    #[error("break width {0} must be finite and positive")]
    BreakWidth(f64),
    /// An explicit item size must be finite and non-negative.
    #[error("item size {width}x{height} must be finite and non-negative")]
    ItemSize {
        /// The rejected width.
        width: f64,
        /// The rejected height.
        height: f64,
    },
}

/// Largest scale step accepted by [`normalized`](CarouselMode::normalized).
const MAX_SCALE_STEP: f64 = 0.99;

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn check_scale_step(step: f64) -> Result<(), ConfigError> {
    if step.is_finite() && (0.0..1.0).contains(&step) {
        Ok(())
    } else {
        Err(ConfigError::ScaleStep(step))
    }
}

fn normalize_scale_step(step: f64) -> f64 {
    if step.is_finite() {
        step.clamp(0.0, MAX_SCALE_STEP)
    } else {
        0.0
    }
}

fn check_layout(size: ItemSize, spacing: f64, insets: Insets) -> Result<(), ConfigError> {
    if !is_non_negative(spacing) {
        return Err(ConfigError::Spacing(spacing));
    }
    if !is_non_negative(insets.horizontal) || !is_non_negative(insets.vertical) {
        return Err(ConfigError::Insets {
            horizontal: insets.horizontal,
            vertical: insets.vertical,
        });
    }
    match size {
        ItemSize::Unspecified => Ok(()),
        ItemSize::Square(side) if is_non_negative(side) => Ok(()),
        ItemSize::Square(side) => Err(ConfigError::ItemSize {
            width: side,
            height: side,
        }),
        ItemSize::Custom(s) if is_non_negative(s.width) && is_non_negative(s.height) => Ok(()),
        ItemSize::Custom(s) => Err(ConfigError::ItemSize {
            width: s.width,
            height: s.height,
        }),
    }
}

fn normalize_size(size: ItemSize) -> ItemSize {
    match size {
        ItemSize::Unspecified => ItemSize::Unspecified,
        ItemSize::Square(side) => ItemSize::Square(non_negative(side)),
        ItemSize::Custom(s) => {
            ItemSize::Custom(Size::new(non_negative(s.width), non_negative(s.height)))
        }
    }
}

fn normalize_insets(insets: Insets) -> Insets {
    Insets::new(non_negative(insets.horizontal), non_negative(insets.vertical))
}

/// Configuration for the flat paging mode.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearConfig {
    /// Page by the whole container width instead of the item width.
    pub fill_page: bool,
    /// Item size policy.
    pub size: ItemSize,
    /// Gap between neighbouring items.
    pub spacing: f64,
    /// Content insets inside the resolved item size.
    pub insets: Insets,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            fill_page: true,
            size: ItemSize::Unspecified,
            spacing: 0.0,
            insets: Insets::ZERO,
        }
    }
}

impl LinearConfig {
    /// Full-page paging with container-sized items.
    #[must_use]
    pub fn simple() -> Self {
        Self::default()
    }

    /// Item-width paging with container-sized items.
    #[must_use]
    pub fn simple_unfilled() -> Self {
        Self {
            fill_page: false,
            ..Self::default()
        }
    }

    /// Sets [`fill_page`](Self::fill_page).
    #[must_use]
    pub fn with_fill_page(mut self, fill_page: bool) -> Self {
        self.fill_page = fill_page;
        self
    }

    /// Sets [`size`](Self::size).
    #[must_use]
    pub fn with_size(mut self, size: ItemSize) -> Self {
        self.size = size;
        self
    }

    /// Sets [`spacing`](Self::spacing).
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets [`insets`](Self::insets).
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_layout(self.size, self.spacing, self.insets)
    }

    /// Returns a copy with every field clamped into range.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            fill_page: self.fill_page,
            size: normalize_size(self.size),
            spacing: non_negative(self.spacing),
            insets: normalize_insets(self.insets),
        }
    }
}

/// Configuration for the centered-scale paging mode.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterScaleConfig {
    /// Scale lost per page of distance from the current page.
    pub scale_step: f64,
    /// Item size policy.
    pub size: ItemSize,
    /// Gap between neighbouring items.
    pub spacing: f64,
    /// Content insets inside the resolved item size.
    pub insets: Insets,
}

impl Default for CenterScaleConfig {
    fn default() -> Self {
        Self {
            scale_step: 0.3,
            size: ItemSize::Unspecified,
            spacing: 0.0,
            insets: Insets::ZERO,
        }
    }
}

impl CenterScaleConfig {
    /// The default configuration.
    #[must_use]
    pub fn simple() -> Self {
        Self::default()
    }

    /// Sets [`scale_step`](Self::scale_step).
    #[must_use]
    pub fn with_scale_step(mut self, scale_step: f64) -> Self {
        self.scale_step = scale_step;
        self
    }

    /// Sets [`size`](Self::size).
    #[must_use]
    pub fn with_size(mut self, size: ItemSize) -> Self {
        self.size = size;
        self
    }

    /// Sets [`spacing`](Self::spacing).
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets [`insets`](Self::insets).
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scale_step(self.scale_step)?;
        check_layout(self.size, self.spacing, self.insets)
    }

    /// Returns a copy with every field clamped into range.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            scale_step: normalize_scale_step(self.scale_step),
            size: normalize_size(self.size),
            spacing: non_negative(self.spacing),
            insets: normalize_insets(self.insets),
        }
    }
}

/// Configuration for the circular stack mode.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackConfig {
    /// Scale lost per ring level.
    pub scale_step: f64,
    /// Horizontal displacement per ring level, as a fraction of the item width.
    pub offset_step: f64,
    /// Shrink each level's displacement by that level's scale.
    pub scale_offsets: bool,
    /// Vertical anchor for scaled, off-center items.
    pub baseline: Baseline,
    /// Item size policy.
    pub size: ItemSize,
    /// Content insets inside the resolved item size.
    pub insets: Insets,
    /// Drag distance that commits a one-page rotation.
    ///
    /// `None` uses half the item width.
    pub break_width: Option<f64>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            scale_step: 0.3,
            offset_step: 0.15,
            scale_offsets: true,
            baseline: Baseline::Bottom,
            size: ItemSize::Unspecified,
            insets: Insets::ZERO,
            break_width: None,
        }
    }
}

impl StackConfig {
    /// The default configuration.
    #[must_use]
    pub fn simple() -> Self {
        Self::default()
    }

    /// Sets [`scale_step`](Self::scale_step).
    #[must_use]
    pub fn with_scale_step(mut self, scale_step: f64) -> Self {
        self.scale_step = scale_step;
        self
    }

    /// Sets [`offset_step`](Self::offset_step).
    #[must_use]
    pub fn with_offset_step(mut self, offset_step: f64) -> Self {
        self.offset_step = offset_step;
        self
    }

    /// Sets [`scale_offsets`](Self::scale_offsets).
    #[must_use]
    pub fn with_scale_offsets(mut self, scale_offsets: bool) -> Self {
        self.scale_offsets = scale_offsets;
        self
    }

    /// Sets [`baseline`](Self::baseline).
    #[must_use]
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets [`size`](Self::size).
    #[must_use]
    pub fn with_size(mut self, size: ItemSize) -> Self {
        self.size = size;
        self
    }

    /// Sets [`insets`](Self::insets).
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Sets [`break_width`](Self::break_width).
    #[must_use]
    pub fn with_break_width(mut self, break_width: Option<f64>) -> Self {
        self.break_width = break_width;
        self
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_scale_step(self.scale_step)?;
        if !is_non_negative(self.offset_step) {
            return Err(ConfigError::OffsetStep(self.offset_step));
        }
        if let Some(width) = self.break_width
            && !(width.is_finite() && width > 0.0)
        {
            return Err(ConfigError::BreakWidth(width));
        }
        check_layout(self.size, 0.0, self.insets)
    }

    /// Returns a copy with every field clamped into range.
    ///
    /// A break width that is not finite and positive falls back to `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            scale_step: normalize_scale_step(self.scale_step),
            offset_step: non_negative(self.offset_step),
            scale_offsets: self.scale_offsets,
            baseline: self.baseline,
            size: normalize_size(self.size),
            insets: normalize_insets(self.insets),
            break_width: self.break_width.filter(|w| w.is_finite() && *w > 0.0),
        }
    }
}

/// The active carousel mode together with its configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarouselMode {
    /// Flat horizontal paging.
    Linear(LinearConfig),
    /// Horizontal paging where items shrink with distance from the center.
    CenterScale(CenterScaleConfig),
    /// Circular stack with perspective scaling and drag-driven rotation.
    Stack(StackConfig),
}

impl Default for CarouselMode {
    fn default() -> Self {
        Self::Linear(LinearConfig::simple())
    }
}

impl CarouselMode {
    /// Checks the wrapped configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Linear(config) => config.validate(),
            Self::CenterScale(config) => config.validate(),
            Self::Stack(config) => config.validate(),
        }
    }

    /// Returns a copy with the wrapped configuration clamped into range.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Linear(config) => Self::Linear(config.normalized()),
            Self::CenterScale(config) => Self::CenterScale(config.normalized()),
            Self::Stack(config) => Self::Stack(config.normalized()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_size_resolves_against_bounds() {
        let bounds = Size::new(300.0, 200.0);
        assert_eq!(ItemSize::Unspecified.resolve(bounds), bounds);
        assert_eq!(
            ItemSize::Square(250.0).resolve(bounds),
            Size::new(200.0, 200.0)
        );
        assert_eq!(
            ItemSize::Custom(Size::new(100.0, 400.0)).resolve(bounds),
            Size::new(100.0, 200.0)
        );
    }

    #[test]
    fn defaults_match_presets() {
        assert!(LinearConfig::simple().fill_page);
        assert!(!LinearConfig::simple_unfilled().fill_page);
        let stack = StackConfig::simple();
        assert_eq!(stack.scale_step, 0.3);
        assert_eq!(stack.offset_step, 0.15);
        assert!(stack.scale_offsets);
        assert_eq!(stack.baseline, Baseline::Bottom);
        assert_eq!(stack.break_width, None);
    }

    #[test]
    fn validation_reports_first_bad_field() {
        assert_eq!(
            CenterScaleConfig::simple().with_scale_step(1.0).validate(),
            Err(ConfigError::ScaleStep(1.0))
        );
        assert_eq!(
            LinearConfig::simple().with_spacing(-2.0).validate(),
            Err(ConfigError::Spacing(-2.0))
        );
        assert_eq!(
            StackConfig::simple().with_break_width(Some(0.0)).validate(),
            Err(ConfigError::BreakWidth(0.0))
        );
        assert!(
            CarouselMode::Stack(StackConfig::simple())
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn normalized_config_always_validates() {
        let mode = CarouselMode::Stack(
            StackConfig::simple()
                .with_scale_step(3.0)
                .with_offset_step(f64::NAN)
                .with_insets(Insets::uniform(-4.0))
                .with_break_width(Some(-1.0)),
        )
        .normalized();
        assert!(mode.validate().is_ok());

        let CarouselMode::Stack(config) = mode else {
            panic!("normalizing keeps the mode");
        };
        assert_eq!(config.scale_step, MAX_SCALE_STEP);
        assert_eq!(config.offset_step, 0.0);
        assert_eq!(config.insets, Insets::ZERO);
        assert_eq!(config.break_width, None);
    }
}
