//! Frames and coordinate spaces
//!
//! All frames fed to the centering model must be computed against the same
//! coordinate space. Instead of looking a space up by name at layout time,
//! the space is carried explicitly next to every frame.

use std::fmt;

/// Identifier of a shared coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateSpace(&'static str);

impl CoordinateSpace {
    /// Space whose origin is the top-left corner of the carousel viewport.
    pub const CAROUSEL: Self = Self::named("carousel");

    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::CAROUSEL
    }
}

impl fmt::Display for CoordinateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Position and size of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// A frame with no width or no height has not been laid out yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// True when the two frames overlap by a positive area.
    pub fn intersects(&self, other: &Frame) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    /// Shrink (or grow) around the center by `factor`.
    pub fn scaled_about_center(&self, factor: f32) -> Frame {
        let width = self.width * factor;
        let height = self.height * factor;
        Frame::new(
            self.mid_x() - width / 2.0,
            self.mid_y() - height / 2.0,
            width,
            height,
        )
    }
}

/// A frame together with the coordinate space it was computed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacedFrame {
    pub space: CoordinateSpace,
    pub frame: Frame,
}

impl SpacedFrame {
    pub const fn new(space: CoordinateSpace, frame: Frame) -> Self {
        Self { space, frame }
    }
}
