//! Numeric helpers shared by the centering model and the surface.

pub mod range;

pub use range::{RangeMapExt, clamp_value, map_value};
