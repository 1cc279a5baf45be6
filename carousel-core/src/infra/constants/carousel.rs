//! Carousel constants
//!
//! Shared constants for carousel geometry, centering and snapping. Tuning
//! should happen here so every carousel host updates consistently.

/// Scale and centering thresholds applied by the centering model.
pub mod scale {
    /// Scale applied to an item one full item width (or more) away from the
    /// viewport center.
    pub const MINIMUM_SCALE_FRACTION: f32 = 0.85;
    /// Absolute distance below which a tapped item counts as centered.
    /// Compared directly against the distance in layout units.
    pub const MIDDLE_DETECTION_TOLERANCE: f32 = 0.05;
    /// Opacity of an item one full item width away. `1.0` keeps every tile
    /// opaque.
    pub const MINIMUM_OPACITY: f32 = 1.0;
}

/// Layout constants for the carousel row.
pub mod layout {
    /// Item width as a fraction of viewport width on compact layouts.
    pub const COMPACT_ITEM_WIDTH_FRACTION: f32 = 0.33;
    /// Item width as a fraction of viewport width on regular (wide) layouts.
    pub const REGULAR_ITEM_WIDTH_FRACTION: f32 = 0.2;
    /// Gap between adjacent items.
    pub const ITEM_SPACING: f32 = 0.0;
    /// Width / height of a video thumbnail.
    pub const VIDEO_IMAGE_RATIO: f32 = 1.5;
}

/// Snap/tween animation defaults.
pub mod snap {
    use crate::infra::runtime_config::EasingKind;

    /// Default duration (ms) of a scroll-to-center animation.
    pub const CENTER_DURATION_MS: u64 = 240;
    /// Default duration (ms) of the settle snap after a drag ends.
    pub const DRAG_SETTLE_DURATION_MS: u64 = 180;
    /// Easing applied to snaps.
    pub const EASING: EasingKind = EasingKind::EaseOut;
    /// Offsets closer than this are considered equal when deciding whether a
    /// scroll is needed at all.
    pub const OFFSET_EPSILON: f32 = 1e-3;
}

/// Windowing around the visible range.
pub mod windows {
    /// Items laid out before the first visible item.
    pub const OVERSCAN_BEFORE: usize = 1;
    /// Items laid out after the last visible item.
    pub const OVERSCAN_AFTER: usize = 1;
}
