//! Point-mass bodies with explicit Euler integration.

use crate::config::BodyConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::rect::Rect;
use crate::vec::Vec2;

/// Stable handle to a body stored in a [`World`](crate::world::World) arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    /// Handle for the body at `index` in a slice of bodies.
    pub fn from_index(index: usize) -> Self {
        BodyId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A point mass driven by accumulated forces.
///
/// Forces go into `acceleration` through [`apply_force`](Body::apply_force);
/// [`integrate`](Body::integrate) folds them into velocity and position and
/// clears the accumulator. Anchored bodies and bodies held by a drag session
/// never integrate.
#[derive(Clone, Debug)]
pub struct Body<F: Float> {
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    pub acceleration: Vec2<F>,
    mass: F,
    config: BodyConfig<F>,
    anchored: bool,
    held: bool,
}

impl<F: Float> Body<F> {
    /// Create a body at rest.
    ///
    /// # Panics
    /// Panics if `mass` is not positive and finite. Catching this here keeps
    /// NaN out of every later force division.
    pub fn new(position: Vec2<F>, mass: F) -> Self {
        match Self::try_new(position, mass) {
            Ok(body) => body,
            Err(err) => panic!("invalid body: {}", err),
        }
    }

    /// Fallible form of [`Body::new`].
    pub fn try_new(position: Vec2<F>, mass: F) -> Result<Self, PhysicsError> {
        if !(mass > F::zero() && mass.is_finite()) {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(Body {
            position,
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            mass,
            config: BodyConfig::new(),
            anchored: false,
            held: false,
        })
    }

    /// A body that never integrates, e.g. a spring anchor or a static wall.
    pub fn anchored(position: Vec2<F>) -> Self {
        let mut body = Self::new(position, F::one());
        body.anchored = true;
        body
    }

    pub fn with_config(mut self, config: BodyConfig<F>) -> Self {
        self.config = config;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2<F>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn mass(&self) -> F { self.mass }
    pub fn config(&self) -> &BodyConfig<F> { &self.config }
    pub fn config_mut(&mut self) -> &mut BodyConfig<F> { &mut self.config }
    pub fn radius(&self) -> F { self.config.radius }
    pub fn capture_radius(&self) -> Option<F> { self.config.capture_radius }
    pub fn is_anchored(&self) -> bool { self.anchored }
    pub fn is_held(&self) -> bool { self.held }

    pub fn speed(&self) -> F {
        self.velocity.length()
    }

    /// Accumulate `force / mass`, then clamp the accumulated acceleration.
    pub fn apply_force(&mut self, force: Vec2<F>) {
        if self.anchored {
            return;
        }
        self.apply_acceleration(force.scale(F::one() / self.mass));
    }

    /// Accumulate an acceleration directly, ignoring mass.
    pub fn apply_acceleration(&mut self, accel: Vec2<F>) {
        if self.anchored || !accel.is_finite() {
            return;
        }
        let limit = self.config.acceleration_limit.max(F::zero());
        self.acceleration = (self.acceleration + accel).clamp_length(limit);
    }

    /// One unit step: velocity, speed clamp, damping, position, clear forces.
    pub fn integrate(&mut self) {
        if self.anchored || self.held {
            return;
        }
        let mut velocity = self.velocity + self.acceleration;
        if self.config.max_speed > F::zero() {
            velocity = velocity.clamp_length(self.config.max_speed);
        }
        self.velocity = velocity.component_mul(self.config.damping);
        self.position = self.position + self.velocity;
        self.acceleration = Vec2::zero();
    }

    /// Constant-magnitude force opposing the current velocity.
    pub fn apply_friction(&mut self, coefficient: F) {
        let friction = (-self.velocity).with_length(coefficient);
        self.apply_force(friction);
    }

    /// Multiply the velocity directly, e.g. 0.99 per step for air resistance.
    pub fn scale_velocity(&mut self, factor: F) {
        if self.anchored || self.held {
            return;
        }
        self.velocity = self.velocity.scale(factor);
    }

    /// Keep the body's contact circle inside `bounds`, reflecting the velocity
    /// component that crossed a wall scaled by `restitution`.
    ///
    /// Returns true if any wall was hit.
    pub fn bounce_within(&mut self, bounds: &Rect<F>, restitution: F) -> bool {
        if self.anchored || self.held {
            return false;
        }
        let r = Vec2::splat(self.config.radius);
        let lo = bounds.min + r;
        let hi = bounds.max() - r;
        let bounce = -restitution;
        let mut hit = false;

        if self.position.y > hi.y {
            self.velocity.y = self.velocity.y * bounce;
            self.position.y = hi.y;
            hit = true;
        }
        if self.position.x > hi.x {
            self.velocity.x = self.velocity.x * bounce;
            self.position.x = hi.x;
            hit = true;
        }
        if self.position.x < lo.x {
            self.velocity.x = self.velocity.x * bounce;
            self.position.x = lo.x;
            hit = true;
        }
        if self.position.y < lo.y {
            self.velocity.y = self.velocity.y * bounce;
            self.position.y = lo.y;
            hit = true;
        }
        hit
    }

    /// Within one unit of the floor (the bottom edge of `bounds`, y grows down).
    pub fn touches_floor(&self, bounds: &Rect<F>) -> bool {
        self.position.y > bounds.max().y - self.config.radius - F::one()
    }

    /// Push away from each wall of `bounds` with `strength / distance`.
    ///
    /// Distances are floored at a small epsilon so a body sitting on a wall
    /// gets a large but finite force, which the acceleration clamp absorbs.
    pub fn apply_wall_repulsion(&mut self, bounds: &Rect<F>, strength: F) {
        let floor = F::from_f32(1e-6);
        let max = bounds.max();
        let top = (self.position.y - bounds.min.y).abs().max(floor);
        let bottom = (max.y - self.position.y).abs().max(floor);
        let left = (self.position.x - bounds.min.x).abs().max(floor);
        let right = (max.x - self.position.x).abs().max(floor);

        self.apply_force(Vec2::new(F::zero(), strength / top));
        self.apply_force(Vec2::new(F::zero(), -strength / bottom));
        self.apply_force(Vec2::new(-strength / right, F::zero()));
        self.apply_force(Vec2::new(strength / left, F::zero()));
    }

    /// Turn the body into a fixed anchor; pending motion is discarded.
    pub fn anchor(&mut self) {
        self.anchored = true;
        self.velocity = Vec2::zero();
        self.acceleration = Vec2::zero();
    }

    pub fn release_anchor(&mut self) {
        self.anchored = false;
    }

    pub(crate) fn set_held(&mut self, held: bool) {
        self.held = held;
        if held {
            self.velocity = Vec2::zero();
            self.acceleration = Vec2::zero();
        }
    }
}
