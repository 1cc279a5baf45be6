//! Runtime configuration for user-adjustable constants
//!
//! This module provides a RuntimeConfig struct with Option<T> fields that override
//! the default constants. Accessor methods fall back to constants when None.

use crate::error::ConfigError;
use crate::infra::config::{CarouselConfig, SizeClass};
use crate::infra::constants::{layout, scale, snap, windows};

/// Easing function type for animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EasingKind {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl EasingKind {
    /// Ease a normalized progress value `t` in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Runtime configuration with optional overrides for constants.
/// Fields are None by default, falling back to compiled constants.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeConfig {
    // ========== CENTERING ==========
    /// Scale of items one item width away from center
    pub minimum_scale_fraction: Option<f32>,
    /// Absolute distance under which a tap hits the centered item
    pub centered_tolerance: Option<f32>,
    /// Opacity of items one item width away from center
    pub minimum_opacity: Option<f32>,

    // ========== LAYOUT ==========
    /// Item width as a fraction of the viewport
    pub item_width_fraction: Option<f32>,
    /// Gap between items
    pub item_spacing: Option<f32>,
    /// Thumbnail width / height
    pub video_aspect_ratio: Option<f32>,
    /// Items laid out before the visible range
    pub overscan_before: Option<usize>,
    /// Items laid out after the visible range
    pub overscan_after: Option<usize>,

    // ========== SNAP ANIMATIONS ==========
    /// Scroll-to-center duration (ms)
    pub center_duration_ms: Option<u64>,
    /// Settle snap duration after a drag (ms)
    pub drag_settle_duration_ms: Option<u64>,
    /// Snap easing function
    pub snap_easing: Option<EasingKind>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== CENTERING ACCESSORS ==========

    pub fn minimum_scale_fraction(&self) -> f32 {
        self.minimum_scale_fraction
            .unwrap_or(scale::MINIMUM_SCALE_FRACTION)
    }

    pub fn centered_tolerance(&self) -> f32 {
        self.centered_tolerance
            .unwrap_or(scale::MIDDLE_DETECTION_TOLERANCE)
    }

    pub fn minimum_opacity(&self) -> f32 {
        self.minimum_opacity.unwrap_or(scale::MINIMUM_OPACITY)
    }

    // ========== LAYOUT ACCESSORS ==========

    /// Explicit override wins over the size-class default.
    pub fn item_width_fraction(&self, size_class: SizeClass) -> f32 {
        self.item_width_fraction
            .unwrap_or_else(|| size_class.item_width_fraction())
    }

    pub fn item_spacing(&self) -> f32 {
        self.item_spacing.unwrap_or(layout::ITEM_SPACING)
    }

    pub fn video_aspect_ratio(&self) -> f32 {
        self.video_aspect_ratio.unwrap_or(layout::VIDEO_IMAGE_RATIO)
    }

    pub fn overscan_before(&self) -> usize {
        self.overscan_before.unwrap_or(windows::OVERSCAN_BEFORE)
    }

    pub fn overscan_after(&self) -> usize {
        self.overscan_after.unwrap_or(windows::OVERSCAN_AFTER)
    }

    // ========== SNAP ACCESSORS ==========

    pub fn center_duration_ms(&self) -> u64 {
        self.center_duration_ms.unwrap_or(snap::CENTER_DURATION_MS)
    }

    pub fn drag_settle_duration_ms(&self) -> u64 {
        self.drag_settle_duration_ms
            .unwrap_or(snap::DRAG_SETTLE_DURATION_MS)
    }

    pub fn snap_easing(&self) -> EasingKind {
        self.snap_easing.unwrap_or(snap::EASING)
    }

    /// Resolve every override into a validated [`CarouselConfig`].
    pub fn resolve(
        &self,
        size_class: SizeClass,
    ) -> Result<CarouselConfig, ConfigError> {
        let config = CarouselConfig {
            size_class,
            item_width_fraction: self.item_width_fraction(size_class),
            item_width_override: self.item_width_fraction,
            item_spacing: self.item_spacing(),
            minimum_scale_fraction: self.minimum_scale_fraction(),
            centered_tolerance: self.centered_tolerance(),
            minimum_opacity: self.minimum_opacity(),
            video_aspect_ratio: self.video_aspect_ratio(),
            overscan_before: self.overscan_before(),
            overscan_after: self.overscan_after(),
            center_duration_ms: self.center_duration_ms(),
            drag_settle_duration_ms: self.drag_settle_duration_ms(),
            snap_easing: self.snap_easing(),
            ..CarouselConfig::for_size_class(size_class)
        };
        config.validate()?;
        Ok(config)
    }
}
