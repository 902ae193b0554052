//! Error types for simulation setup.

use thiserror::Error;

/// Errors raised while building bodies, constraints and scenes.
///
/// Nothing in a running step produces these: degenerate numeric cases are
/// absorbed by clamping, so errors only come from invalid parameters or
/// stale handles.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Spring stiffness must be positive and finite.
    #[error("stiffness must be positive and finite")]
    InvalidStiffness,
    /// Spring rest length must be non-negative and finite.
    #[error("rest length must be non-negative and finite")]
    InvalidRestLength,
    /// Box or rectangle extents must be non-negative.
    #[error("extents must be non-negative")]
    InvalidExtents,
    /// Drag or friction coefficient must be non-negative and finite.
    #[error("coefficient must be non-negative and finite")]
    InvalidCoefficient,
    /// Wave period must be non-zero and finite.
    #[error("period must be non-zero and finite")]
    InvalidPeriod,
    /// Body handle does not name a body in this world.
    #[error("body index {index} out of bounds (count: {count})")]
    BodyOutOfBounds { index: usize, count: usize },
    /// Body handle names a slot whose body was removed.
    #[error("body {index} was removed")]
    BodyRemoved { index: usize },
    /// Collider handle does not name a live collider.
    #[error("collider index {index} out of bounds (count: {count})")]
    ColliderOutOfBounds { index: usize, count: usize },
}
