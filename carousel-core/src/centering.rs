//! Centering model
//!
//! Maps an item's horizontal offset from the viewport center to a visual
//! scale and opacity, and decides whether the item counts as centered.
//!
//! Distances are signed: positive means the item sits left of center.

use crate::geometry::{CoordinateSpace, Frame, SpacedFrame};
use crate::infra::config::CarouselConfig;
use crate::math::map_value;

/// Per-item result of one layout pass. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteringResult {
    pub distance_from_center: f32,
    /// In `[minimum_scale_fraction, 1.0]`.
    pub scale: f32,
    /// In `[minimum_opacity, 1.0]`.
    pub opacity: f32,
    pub is_centered: bool,
}

impl CenteringResult {
    /// Result used while geometry is unavailable.
    pub const UNLAID: Self = Self {
        distance_from_center: 0.0,
        scale: 1.0,
        opacity: 1.0,
        is_centered: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteringModel {
    space: CoordinateSpace,
    minimum_scale_fraction: f32,
    centered_tolerance: f32,
    minimum_opacity: f32,
}

impl CenteringModel {
    pub fn new(
        space: CoordinateSpace,
        minimum_scale_fraction: f32,
        centered_tolerance: f32,
    ) -> Self {
        Self {
            space,
            minimum_scale_fraction,
            centered_tolerance,
            minimum_opacity: 1.0,
        }
    }

    pub fn from_config(config: &CarouselConfig) -> Self {
        Self::new(
            config.space,
            config.minimum_scale_fraction,
            config.centered_tolerance,
        )
        .with_minimum_opacity(config.minimum_opacity)
    }

    pub fn with_minimum_opacity(mut self, minimum_opacity: f32) -> Self {
        self.minimum_opacity = minimum_opacity;
        self
    }

    pub fn space(&self) -> CoordinateSpace {
        self.space
    }

    pub fn minimum_scale_fraction(&self) -> f32 {
        self.minimum_scale_fraction
    }

    pub fn centered_tolerance(&self) -> f32 {
        self.centered_tolerance
    }

    /// Signed distance from the viewport midpoint to the item midpoint.
    ///
    /// Returns `0` for a frame that has not been laid out yet (zero width or
    /// height), so the first layout pass renders every item at full scale.
    pub fn distance_from_center(viewport_width: f32, frame: &Frame) -> f32 {
        if frame.is_empty() {
            return 0.0;
        }
        viewport_width / 2.0 - frame.mid_x()
    }

    /// Scale for an item `distance` away from center.
    ///
    /// Reaches `minimum_scale_fraction` once `|distance| >= item_width`.
    pub fn scale_for(&self, distance: f32, item_width: f32) -> f32 {
        if distance == 0.0 || item_width <= 0.0 {
            return 1.0;
        }
        let covered = distance.abs().clamp(0.0, item_width) / item_width;
        // `1 - covered` is already in [0, 1].
        let scaling_factor = (1.0 - covered).abs();
        let min = self.minimum_scale_fraction;
        min + (1.0 - min) * scaling_factor
    }

    /// Opacity ramp from `1.0` at center to `minimum_opacity` one item width
    /// away.
    pub fn opacity_for(&self, distance: f32, item_width: f32) -> f32 {
        if item_width <= 0.0 || self.minimum_opacity >= 1.0 {
            return 1.0;
        }
        map_value(
            distance.abs(),
            &(0.0..=item_width),
            &(1.0..=self.minimum_opacity),
            true,
        )
    }

    /// Strict comparison against the absolute tolerance.
    pub fn is_centered(&self, distance: f32) -> bool {
        distance.abs() < self.centered_tolerance
    }

    /// Evaluate a reported frame against the viewport.
    ///
    /// A frame from a foreign coordinate space cannot be compared with the
    /// viewport and is treated like missing geometry.
    pub fn evaluate(
        &self,
        viewport_width: f32,
        frame: &SpacedFrame,
    ) -> CenteringResult {
        if frame.space != self.space {
            log::warn!(
                "Centering: frame reported in space '{}' but model expects '{}'",
                frame.space,
                self.space
            );
            return CenteringResult::UNLAID;
        }

        let distance = Self::distance_from_center(viewport_width, &frame.frame);
        let width = frame.frame.width;
        CenteringResult {
            distance_from_center: distance,
            scale: self.scale_for(distance, width),
            opacity: self.opacity_for(distance, width),
            is_centered: self.is_centered(distance),
        }
    }
}

impl Default for CenteringModel {
    fn default() -> Self {
        Self::from_config(&CarouselConfig::default())
    }
}
