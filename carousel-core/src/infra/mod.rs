//! Infrastructure: compiled-in tunables and the typed configuration built
//! from them.

pub mod config;
pub mod constants;
pub mod runtime_config;

pub use config::{CarouselConfig, SizeClass};
pub use runtime_config::{EasingKind, RuntimeConfig};
