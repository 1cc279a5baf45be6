//! Error types for the carousel engine.
//!
//! Geometry and selection never fail. Configuration validation is the only
//! fallible call; image providers report failures through
//! [`crate::image::ImageState::Failed`].

use thiserror::Error;

/// Invalid tunables passed to [`crate::infra::config::CarouselConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("minimum scale fraction must be in (0, 1], got {0}")]
    MinimumScaleFraction(f32),

    #[error("item width fraction must be in (0, 1], got {0}")]
    ItemWidthFraction(f32),

    #[error("centered tolerance must be non-negative, got {0}")]
    CenteredTolerance(f32),

    #[error("item spacing must be non-negative, got {0}")]
    ItemSpacing(f32),

    #[error("minimum opacity must be in [0, 1], got {0}")]
    MinimumOpacity(f32),

    #[error("video aspect ratio must be positive, got {0}")]
    AspectRatio(f32),
}

/// Errors reported by an [`crate::image::ImageProvider`] for a single load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageLoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("Invalid carousel configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for fallible carousel operations
pub type Result<T> = std::result::Result<T, CarouselError>;
