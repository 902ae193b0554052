//! Hookean spring constraints between two bodies.

use crate::body::{Body, BodyId};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;

/// Stable handle to a spring stored in a [`World`](crate::world::World).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpringId(pub(crate) usize);

impl SpringId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A spring pulling `bob` toward `rest_length` away from `anchor`.
///
/// The force is recomputed from current positions every time it is asked
/// for; the constraint keeps no state of its own.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConstraint<F: Float> {
    pub anchor: BodyId,
    pub bob: BodyId,
    rest_length: F,
    stiffness: F,
}

impl<F: Float> SpringConstraint<F> {
    pub fn new(anchor: BodyId, bob: BodyId, rest_length: F, stiffness: F) -> Result<Self, PhysicsError> {
        if !(rest_length >= F::zero() && rest_length.is_finite()) {
            return Err(PhysicsError::InvalidRestLength);
        }
        if !(stiffness > F::zero() && stiffness.is_finite()) {
            return Err(PhysicsError::InvalidStiffness);
        }
        Ok(SpringConstraint { anchor, bob, rest_length, stiffness })
    }

    /// Spring whose rest length is the current distance between the bodies.
    pub fn from_bodies(anchor: BodyId, bob: BodyId, bodies: &[Body<F>], stiffness: F) -> Result<Self, PhysicsError> {
        let position = |id: BodyId| {
            bodies.get(id.index()).map(|b| b.position).ok_or(PhysicsError::BodyOutOfBounds {
                index: id.index(),
                count: bodies.len(),
            })
        };
        let rest_length = position(anchor)?.distance(position(bob)?);
        Self::new(anchor, bob, rest_length, stiffness)
    }

    pub fn rest_length(&self) -> F { self.rest_length }
    pub fn stiffness(&self) -> F { self.stiffness }

    fn direction(&self, bodies: &[Body<F>]) -> Vec2<F> {
        bodies[self.bob.index()].position - bodies[self.anchor.index()].position
    }

    /// Current length minus rest length; positive when stretched.
    pub fn extension(&self, bodies: &[Body<F>]) -> F {
        self.direction(bodies).length() - self.rest_length
    }

    /// Force on the bob. The anchor receives the negation.
    ///
    /// When the two bodies coincide there is no direction to push along and
    /// the force is zero; the bodies separate once anything else moves them.
    pub fn evaluate_force(&self, bodies: &[Body<F>]) -> Vec2<F> {
        let direction = self.direction(bodies);
        let distance = direction.length();
        if distance.is_near_zero(F::from_f32(1e-10)) {
            return Vec2::zero();
        }
        let extension = distance - self.rest_length;
        direction.scale(-extension * self.stiffness / distance)
    }

    /// Apply the force pair: `force` to the bob and `-force` to the anchor.
    pub fn apply(&self, bodies: &mut [Body<F>]) -> Vec2<F> {
        let force = self.evaluate_force(bodies);
        bodies[self.bob.index()].apply_force(force);
        bodies[self.anchor.index()].apply_force(-force);
        force
    }
}
