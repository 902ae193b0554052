//! Configuration types for bodies and worlds.

use crate::drag::ReleaseImpulse;
use crate::float::Float;
use crate::rect::Rect;
use crate::vec::Vec2;

/// Acceleration ceiling applied after every force, in force-units per step.
pub const DEFAULT_ACCELERATION_LIMIT: f32 = 10.0;

/// Per-body behaviour that the sketches used to get from subclasses.
///
/// # Builder Pattern
/// ```
/// use nudge::config::BodyConfig;
/// use nudge::vec::Vec2;
///
/// // The flight-game bird: capped speed, vertical speed bleeds off.
/// let bird: BodyConfig<f32> = BodyConfig::new()
///     .with_max_speed(15.0)
///     .with_damping(Vec2::new(1.0, 0.9))
///     .with_radius(16.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyConfig<F: Float> {
    /// Speed ceiling. 0 disables the clamp. Default: 0.
    pub max_speed: F,
    /// Per-axis velocity multiplier applied each integration, 1 = no damping.
    /// Default: (1, 1).
    pub damping: Vec2<F>,
    /// Acceleration magnitude ceiling after each applied force, never
    /// negative. Default: 10.
    pub acceleration_limit: F,
    /// Multiplier on world gravity. 0 gives a body that keeps its velocity,
    /// like a scrolling pipe. Default: 1.
    pub gravity_scale: F,
    /// Contact radius used for wall bounce and floor contact. Default: 0.
    pub radius: F,
    /// Pointer distance (strictly less than) at which a drag can grab the body.
    /// `None` means the body cannot be dragged. Default: `None`.
    pub capture_radius: Option<F>,
}

impl<F: Float> BodyConfig<F> {
    pub fn new() -> Self {
        BodyConfig {
            max_speed: F::zero(),
            damping: Vec2::splat(F::one()),
            acceleration_limit: F::from_f32(DEFAULT_ACCELERATION_LIMIT),
            gravity_scale: F::one(),
            radius: F::zero(),
            capture_radius: None,
        }
    }

    pub fn with_max_speed(mut self, max_speed: F) -> Self {
        self.max_speed = max_speed.max(F::zero());
        self
    }

    /// Set the per-axis damping; components are clamped to [0, 1].
    pub fn with_damping(mut self, damping: Vec2<F>) -> Self {
        self.damping = Vec2::new(
            damping.x.clamp(F::zero(), F::one()),
            damping.y.clamp(F::zero(), F::one()),
        );
        self
    }

    /// Set the acceleration ceiling; negative limits are floored to 0.
    pub fn with_acceleration_limit(mut self, limit: F) -> Self {
        self.acceleration_limit = limit.max(F::zero());
        self
    }

    pub fn with_gravity_scale(mut self, scale: F) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_radius(mut self, radius: F) -> Self {
        self.radius = radius.max(F::zero());
        self
    }

    pub fn with_capture_radius(mut self, capture_radius: F) -> Self {
        self.capture_radius = Some(capture_radius);
        self
    }

    /// Draggable with a capture radius equal to the contact radius.
    pub fn draggable(mut self) -> Self {
        self.capture_radius = Some(self.radius);
        self
    }
}

impl<F: Float> Default for BodyConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene-wide settings for [`World::step`](crate::world::World::step).
///
/// # Builder Pattern
/// ```
/// use nudge::config::WorldConfig;
/// use nudge::rect::Rect;
/// use nudge::vec::Vec2;
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_gravity(Vec2::new(0.0, 0.2))
///     .with_bounds(Rect::from_size(800.0, 800.0).unwrap())
///     .with_floor_friction(0.01)
///     .with_sub_steps(8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig<F: Float> {
    /// Gravity, applied to each body scaled by its mass. Default: zero.
    pub gravity: Vec2<F>,
    /// Wind, applied to each body as a plain force. Default: zero.
    pub wind: Vec2<F>,
    /// Force-and-integrate passes per step. Spring chains need around 8 to
    /// stay stable. Default: 1.
    pub sub_steps: usize,
    /// Walls the bodies bounce off. Default: none.
    pub bounds: Option<Rect<F>>,
    /// Fraction of speed kept when bouncing off a wall. Default: 0.9.
    pub restitution: F,
    /// Magnitude of the friction force while a body touches the floor.
    /// Default: 0 (off).
    pub floor_friction: F,
    /// How a drag release turns into an impulse. Default: `Preserve`.
    pub release: ReleaseImpulse<F>,
}

impl<F: Float> WorldConfig<F> {
    pub fn new() -> Self {
        WorldConfig {
            gravity: Vec2::zero(),
            wind: Vec2::zero(),
            sub_steps: 1,
            bounds: None,
            restitution: F::from_f32(0.9),
            floor_friction: F::zero(),
            release: ReleaseImpulse::Preserve,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_wind(mut self, wind: Vec2<F>) -> Self {
        self.wind = wind;
        self
    }

    /// Set the number of sub-steps (at least 1).
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect<F>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_floor_friction(mut self, friction: F) -> Self {
        self.floor_friction = friction.max(F::zero());
        self
    }

    pub fn with_release(mut self, release: ReleaseImpulse<F>) -> Self {
        self.release = release;
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
