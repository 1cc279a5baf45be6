//! Carousel core library
//!
//! Headless engine behind a horizontally scrolling carousel of video
//! thumbnails. The item closest to the viewport center is drawn at full
//! size, items further away shrink toward a minimum scale fraction, and
//! tapping an off-center item scrolls it back to the center.
//!
//! Notes
//! - Everything here runs on the caller's UI thread; no type is `Sync`.
//! - Hosts (terminal, GPU, test harness) own drawing and input. They feed
//!   viewport sizes, drags and taps in, and read [`presentation::TileView`]s
//!   back out after each layout pass.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod centering;
pub mod error;
pub mod geometry;
pub mod image;
pub mod infra;
pub mod item;
pub mod math;
pub mod prelude;
pub mod presentation;
pub mod store;
pub mod surface;

pub use error::{CarouselError, ConfigError, ImageLoadError, Result};
