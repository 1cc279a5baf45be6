//! Typed carousel configuration
//!
//! Presets mirror the two layouts the carousel supports: a compact layout
//! showing roughly three items and a regular (wide) layout showing five.

use crate::error::ConfigError;
use crate::geometry::CoordinateSpace;
use crate::infra::constants::{layout, scale, snap, windows};
use crate::infra::runtime_config::EasingKind;

/// Horizontal size class of the host window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeClass {
    #[default]
    Compact,
    Regular,
}

impl SizeClass {
    pub const fn item_width_fraction(self) -> f32 {
        match self {
            Self::Compact => layout::COMPACT_ITEM_WIDTH_FRACTION,
            Self::Regular => layout::REGULAR_ITEM_WIDTH_FRACTION,
        }
    }
}

/// Static configuration for a carousel instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselConfig {
    pub size_class: SizeClass,
    /// Fraction of the viewport width each item occupies.
    pub item_width_fraction: f32,
    /// Explicit width fraction that survives size-class switches.
    pub item_width_override: Option<f32>,
    pub item_spacing: f32,
    pub minimum_scale_fraction: f32,
    pub centered_tolerance: f32,
    pub minimum_opacity: f32,
    /// Width / height of the thumbnail drawn inside each item.
    pub video_aspect_ratio: f32,
    pub overscan_before: usize,
    pub overscan_after: usize,
    pub center_duration_ms: u64,
    pub drag_settle_duration_ms: u64,
    pub snap_easing: EasingKind,
    /// Space every reported frame is computed in.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub space: CoordinateSpace,
}

impl CarouselConfig {
    /// Roughly three items across.
    pub const fn compact_defaults() -> Self {
        Self::for_size_class(SizeClass::Compact)
    }

    /// Roughly five items across, for wide windows.
    pub const fn regular_defaults() -> Self {
        Self::for_size_class(SizeClass::Regular)
    }

    pub const fn for_size_class(size_class: SizeClass) -> Self {
        Self {
            size_class,
            item_width_fraction: size_class.item_width_fraction(),
            item_width_override: None,
            item_spacing: layout::ITEM_SPACING,
            minimum_scale_fraction: scale::MINIMUM_SCALE_FRACTION,
            centered_tolerance: scale::MIDDLE_DETECTION_TOLERANCE,
            minimum_opacity: scale::MINIMUM_OPACITY,
            video_aspect_ratio: layout::VIDEO_IMAGE_RATIO,
            overscan_before: windows::OVERSCAN_BEFORE,
            overscan_after: windows::OVERSCAN_AFTER,
            center_duration_ms: snap::CENTER_DURATION_MS,
            drag_settle_duration_ms: snap::DRAG_SETTLE_DURATION_MS,
            snap_easing: snap::EASING,
            space: CoordinateSpace::CAROUSEL,
        }
    }

    /// Switch size class, keeping every other tunable. An explicit width
    /// override keeps winning over the preset.
    pub fn with_size_class(mut self, size_class: SizeClass) -> Self {
        self.size_class = size_class;
        self.item_width_fraction = self
            .item_width_override
            .unwrap_or_else(|| size_class.item_width_fraction());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fraction_ok = |v: f32| v > 0.0 && v <= 1.0;

        if !fraction_ok(self.minimum_scale_fraction) {
            return Err(ConfigError::MinimumScaleFraction(
                self.minimum_scale_fraction,
            ));
        }
        if !fraction_ok(self.item_width_fraction) {
            return Err(ConfigError::ItemWidthFraction(
                self.item_width_fraction,
            ));
        }
        if !(self.centered_tolerance >= 0.0) {
            return Err(ConfigError::CenteredTolerance(self.centered_tolerance));
        }
        if !(self.item_spacing >= 0.0) {
            return Err(ConfigError::ItemSpacing(self.item_spacing));
        }
        if !(0.0..=1.0).contains(&self.minimum_opacity) {
            return Err(ConfigError::MinimumOpacity(self.minimum_opacity));
        }
        if !(self.video_aspect_ratio > 0.0) {
            return Err(ConfigError::AspectRatio(self.video_aspect_ratio));
        }
        Ok(())
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::compact_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(CarouselConfig::compact_defaults().validate().is_ok());
        assert!(CarouselConfig::regular_defaults().validate().is_ok());
    }

    #[test]
    fn regular_layout_fits_more_items() {
        assert!(
            CarouselConfig::regular_defaults().item_width_fraction
                < CarouselConfig::compact_defaults().item_width_fraction
        );
    }

    #[test]
    fn switching_size_class_uses_the_preset_width() {
        let config = CarouselConfig::compact_defaults()
            .with_size_class(SizeClass::Regular);
        assert_eq!(config, CarouselConfig::regular_defaults());
    }

    #[test]
    fn width_override_survives_size_class_round_trip() {
        let config = CarouselConfig {
            item_width_fraction: 0.5,
            item_width_override: Some(0.5),
            ..CarouselConfig::compact_defaults()
        };
        let round_trip = config
            .with_size_class(SizeClass::Regular)
            .with_size_class(SizeClass::Compact);
        assert_eq!(round_trip.item_width_fraction, 0.5);
        assert_eq!(round_trip, config);
    }

    #[test]
    fn nan_tolerance_is_rejected() {
        let config = CarouselConfig {
            centered_tolerance: f32::NAN,
            ..CarouselConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CenteredTolerance(_))
        ));
    }

    #[test]
    fn zero_width_items_are_rejected() {
        let config = CarouselConfig {
            item_width_fraction: 0.0,
            ..CarouselConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ItemWidthFraction(0.0)));
    }
}
