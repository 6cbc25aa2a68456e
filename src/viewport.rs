//! Display-space viewport rectangle.
//!
//! Corners follow a y-up convention: `top_left` is visually the upper-left
//! corner, so its `y` is the larger of the two.

use crate::error::ViewError;
use glam::DVec2;

/// An axis-aligned rectangle in display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    top_left: DVec2,
    bottom_right: DVec2,
}

impl Viewport {
    /// Builds a viewport, rejecting corners that are not strictly ordered.
    pub fn new(top_left: DVec2, bottom_right: DVec2) -> Result<Self, ViewError> {
        // Written as negated comparisons so NaN coordinates are rejected too.
        if !(top_left.x < bottom_right.x) || !(top_left.y > bottom_right.y) {
            return Err(ViewError::InvalidGeometry {
                top_left,
                bottom_right,
            });
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// Viewport spanning `[0, width] x [0, height]` with the origin at the bottom-left.
    pub fn from_size(width: f64, height: f64) -> Result<Self, ViewError> {
        Self::new(DVec2::new(0.0, height), DVec2::new(width, 0.0))
    }

    pub fn top_left(&self) -> DVec2 {
        self.top_left
    }

    pub fn bottom_right(&self) -> DVec2 {
        self.bottom_right
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.top_left.y - self.bottom_right.y
    }

    /// Arithmetic midpoint of the two corners.
    pub fn center(&self) -> DVec2 {
        (self.top_left + self.bottom_right) * 0.5
    }

    /// Moves `bottom_right.x`; the top-left corner stays put.
    pub fn set_width(&mut self, width: f64) -> Result<(), ViewError> {
        self.set_dimensions(width, self.height())
    }

    /// Moves `top_left.y`; the bottom-right corner stays put.
    pub fn set_height(&mut self, height: f64) -> Result<(), ViewError> {
        self.set_dimensions(self.width(), height)
    }

    /// Resizes in place.
    ///
    /// Width changes move `bottom_right.x` (top-left stays put); height changes
    /// move `top_left.y` (bottom-right stays put). Non-positive sizes are
    /// rejected and the viewport is left as it was.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<(), ViewError> {
        let top_left = DVec2::new(self.top_left.x, self.bottom_right.y + height);
        let bottom_right = DVec2::new(self.top_left.x + width, self.bottom_right.y);
        *self = Self::new(top_left, bottom_right)?;
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            top_left: DVec2::new(0.0, 600.0),
            bottom_right: DVec2::new(800.0, 0.0),
        }
    }
}
