//! Common imports for carousel hosts.

pub use crate::centering::{CenteringModel, CenteringResult};
pub use crate::error::{CarouselError, ConfigError, ImageLoadError, Result};
pub use crate::geometry::{CoordinateSpace, Frame, Size, SpacedFrame};
pub use crate::image::{
    ImageHandle, ImageProvider, ImageState, LoadHandle, NoImages,
};
pub use crate::infra::constants::scale::{
    MIDDLE_DETECTION_TOLERANCE, MINIMUM_SCALE_FRACTION,
};
pub use crate::infra::{CarouselConfig, EasingKind, RuntimeConfig, SizeClass};
pub use crate::item::{CarouselItem, ItemId, seed::video_seed};
pub use crate::math::{RangeMapExt, clamp_value, map_value};
pub use crate::presentation::{
    Carousel, CarouselMessage, TapOutcome, TileView,
};
pub use crate::store::{CarouselState, CarouselStore, SelectionChange};
pub use crate::surface::{
    CarouselSurface, ItemDiff, ItemSurface, LaidOutItem, LayoutPass,
    ScrollOutcome, VisibilityPhase,
};
