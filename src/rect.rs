//! Axis-aligned world-space rectangles.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;

/// An axis-aligned rectangle given by its top-left corner and size.
///
/// Used for drag zones and for the walls bodies bounce off.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<F: Float> {
    pub min: Vec2<F>,
    pub size: Vec2<F>,
}

impl<F: Float> Rect<F> {
    /// Rectangle from its top-left corner and size. Sizes must be non-negative.
    pub fn new(x: F, y: F, width: F, height: F) -> Result<Self, PhysicsError> {
        if !(width >= F::zero() && height >= F::zero()) {
            return Err(PhysicsError::InvalidExtents);
        }
        Ok(Rect { min: Vec2::new(x, y), size: Vec2::new(width, height) })
    }

    /// Rectangle covering `(0, 0)` to `(width, height)`, e.g. a canvas.
    pub fn from_size(width: F, height: F) -> Result<Self, PhysicsError> {
        Self::new(F::zero(), F::zero(), width, height)
    }

    pub fn max(&self) -> Vec2<F> {
        self.min + self.size
    }

    pub fn width(&self) -> F { self.size.x }
    pub fn height(&self) -> F { self.size.y }

    /// Strict containment: points on the edge are outside.
    pub fn contains(&self, point: Vec2<F>) -> bool {
        let max = self.max();
        point.x > self.min.x && point.x < max.x && point.y > self.min.y && point.y < max.y
    }
}
