//! Step observer trait for watching a world step unfold.

use crate::body::BodyId;
use crate::collision::ColliderId;

/// Hooks called by [`World::step`](crate::world::World::step).
///
/// Useful for debug overlays, scoring, or counting work. All methods have
/// default no-op implementations.
pub trait StepObserver {
    /// Called after every body has integrated in a sub-step.
    fn on_integrate(&mut self, _sub_step: usize) {}

    /// Called for each listener that fired during collision evaluation.
    fn on_collision(&mut self, _subject: ColliderId, _target: ColliderId) {}

    /// Called when a drag session grabs a body.
    fn on_grab(&mut self, _body: BodyId) {}

    /// Called when a drag session ends with a release.
    fn on_release(&mut self, _body: BodyId) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
