//! Rectangular drag zones such as a pool of water.

use crate::body::Body;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::rect::Rect;
use crate::vec::Vec2;

/// A region that resists motion with a force proportional to squared speed.
///
/// Membership is decided by the body's position alone; its radius or
/// collider size plays no part.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceField<F: Float> {
    pub bounds: Rect<F>,
    coefficient: F,
}

impl<F: Float> ForceField<F> {
    pub fn new(bounds: Rect<F>, coefficient: F) -> Result<Self, PhysicsError> {
        if !(coefficient >= F::zero() && coefficient.is_finite()) {
            return Err(PhysicsError::InvalidCoefficient);
        }
        Ok(ForceField { bounds, coefficient })
    }

    pub fn coefficient(&self) -> F { self.coefficient }

    pub fn contains(&self, body: &Body<F>) -> bool {
        self.bounds.contains(body.position)
    }

    /// `-v̂ * c * |v|²`, limited to `|v|` so the drag alone can never flip
    /// the direction of travel within one step.
    pub fn drag_force(&self, body: &Body<F>) -> Vec2<F> {
        let speed_sq = body.velocity.length_sq();
        (-body.velocity)
            .normalize()
            .scale(self.coefficient * speed_sq)
            .clamp_length(speed_sq.sqrt())
    }

    /// Apply drag if the body is inside the zone. Returns whether it was.
    pub fn apply(&self, body: &mut Body<F>) -> bool {
        if !self.contains(body) {
            return false;
        }
        let drag = self.drag_force(body);
        body.apply_force(drag);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> ForceField<f32> {
        ForceField::new(Rect::new(0.0, 500.0, 800.0, 300.0).unwrap(), 0.1).unwrap()
    }

    #[test]
    fn drag_opposes_velocity() {
        let body = Body::new(Vec2::new(100.0f32, 600.0), 1.0).with_velocity(Vec2::new(0.0, 3.0));
        let drag = water().drag_force(&body);
        assert!((drag.y + 0.9).abs() < 1e-5, "drag = {:?}", drag);
        assert_eq!(drag.x, 0.0);
    }

    #[test]
    fn drag_limited_to_speed() {
        let heavy = ForceField::new(Rect::from_size(10.0f32, 10.0).unwrap(), 5.0).unwrap();
        let body = Body::new(Vec2::new(5.0f32, 5.0), 1.0).with_velocity(Vec2::new(2.0, 0.0));
        let drag = heavy.drag_force(&body);
        assert!((drag.x + 2.0).abs() < 1e-5);
    }

    #[test]
    fn resting_body_feels_nothing() {
        let body = Body::new(Vec2::new(100.0f32, 600.0), 1.0);
        assert_eq!(water().drag_force(&body), Vec2::zero());
    }

    #[test]
    fn negative_coefficient_rejected() {
        let bounds = Rect::from_size(1.0f32, 1.0).unwrap();
        assert_eq!(ForceField::new(bounds, -0.1), Err(PhysicsError::InvalidCoefficient));
    }
}
