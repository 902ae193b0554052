//! Single-pointer drag arbitration.
//!
//! At most one body is held at a time. While held, the body follows the
//! pointer (keeping the offset at which it was grabbed), does not integrate,
//! and keeps a smoothed estimate of how fast it is being moved. Letting go
//! turns that estimate into a force on the body.
//!
//! ```text
//!   Idle --(pressed, body under pointer)--> Dragging(body)
//!   Dragging(body) --(released)--> Idle   [impulse applied]
//! ```

use crate::body::{Body, BodyId};
use crate::float::Float;
use crate::vec::Vec2;

/// How the drag velocity estimate becomes a force on release.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReleaseImpulse<F: Float> {
    /// `estimate * mass`: a flick keeps both its direction and its speed.
    Preserve,
    /// `normalize(estimate) * magnitude * mass`: only the direction counts.
    Fixed { magnitude: F },
}

impl<F: Float> ReleaseImpulse<F> {
    /// The fixed-magnitude variant with the magnitude the sketches used.
    pub fn fixed() -> Self {
        ReleaseImpulse::Fixed { magnitude: F::from_f32(10.0) }
    }

    pub fn impulse(&self, estimate: Vec2<F>, mass: F) -> Vec2<F> {
        match *self {
            ReleaseImpulse::Preserve => estimate.scale(mass),
            ReleaseImpulse::Fixed { magnitude } => estimate.normalize().scale(magnitude * mass),
        }
    }
}

/// Pointer state sampled once per tick by the driver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput<F: Float> {
    pub position: Vec2<F>,
    pub pressed: bool,
}

impl<F: Float> PointerInput<F> {
    pub fn pressed(position: Vec2<F>) -> Self {
        PointerInput { position, pressed: true }
    }

    pub fn released(position: Vec2<F>) -> Self {
        PointerInput { position, pressed: false }
    }
}

impl<F: Float> Default for PointerInput<F> {
    fn default() -> Self {
        PointerInput { position: Vec2::zero(), pressed: false }
    }
}

/// The body currently held and what is known about its motion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession<F: Float> {
    pub body: BodyId,
    pub grab_offset: Vec2<F>,
    pub velocity_estimate: Vec2<F>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragState<F: Float> {
    Idle,
    Dragging(DragSession<F>),
}

/// Transition reported by [`DragController::update`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragEvent<F: Float> {
    Grabbed(BodyId),
    Released { body: BodyId, impulse: Vec2<F> },
}

/// Owns the drag session for one simulation.
#[derive(Clone, Debug)]
pub struct DragController<F: Float> {
    state: DragState<F>,
    release: ReleaseImpulse<F>,
}

impl<F: Float> DragController<F> {
    pub fn new(release: ReleaseImpulse<F>) -> Self {
        DragController { state: DragState::Idle, release }
    }

    pub fn state(&self) -> &DragState<F> {
        &self.state
    }

    pub fn release_mode(&self) -> ReleaseImpulse<F> {
        self.release
    }

    pub fn set_release_mode(&mut self, release: ReleaseImpulse<F>) {
        self.release = release;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn dragged_body(&self) -> Option<BodyId> {
        match self.state {
            DragState::Dragging(session) => Some(session.body),
            DragState::Idle => None,
        }
    }

    /// The body a press at `point` would grab: the last one in `bodies`
    /// (drawn on top) whose capture radius strictly contains the point.
    pub fn pick(bodies: &[Body<F>], point: Vec2<F>) -> Option<BodyId> {
        bodies
            .iter()
            .enumerate()
            .rev()
            .find(|(_, body)| match body.capture_radius() {
                Some(radius) => point.distance_sq(body.position) < radius * radius,
                None => false,
            })
            .map(|(index, _)| BodyId::from_index(index))
    }

    /// Advance the state machine by one pointer sample.
    pub fn update(&mut self, pointer: &PointerInput<F>, bodies: &mut [Body<F>]) -> Option<DragEvent<F>> {
        match (self.state, pointer.pressed) {
            (DragState::Idle, true) => {
                let id = Self::pick(bodies, pointer.position)?;
                let body = &mut bodies[id.index()];
                body.set_held(true);
                self.state = DragState::Dragging(DragSession {
                    body: id,
                    grab_offset: pointer.position - body.position,
                    velocity_estimate: Vec2::zero(),
                });
                log::debug!("drag grabbed body {}", id.index());
                Some(DragEvent::Grabbed(id))
            }
            (DragState::Dragging(mut session), true) => {
                let Some(body) = bodies.get_mut(session.body.index()) else {
                    self.state = DragState::Idle;
                    return None;
                };
                let target = pointer.position - session.grab_offset;
                let delta = target - body.position;
                session.velocity_estimate = (session.velocity_estimate + delta).scale(F::half());
                body.position = target;
                body.set_held(true);
                self.state = DragState::Dragging(session);
                None
            }
            (DragState::Dragging(session), false) => {
                self.state = DragState::Idle;
                let body = bodies.get_mut(session.body.index())?;
                body.velocity = Vec2::zero();
                body.acceleration = Vec2::zero();
                body.set_held(false);
                let impulse = self.release.impulse(session.velocity_estimate, body.mass());
                body.apply_force(impulse);
                log::debug!(
                    "drag released body {} with impulse ({:?}, {:?})",
                    session.body.index(),
                    impulse.x,
                    impulse.y
                );
                Some(DragEvent::Released { body: session.body, impulse })
            }
            (DragState::Idle, false) => None,
        }
    }

    /// End the session without an impulse. Returns the body that was held.
    pub fn cancel(&mut self, bodies: &mut [Body<F>]) -> Option<BodyId> {
        let id = self.dragged_body()?;
        self.state = DragState::Idle;
        if let Some(body) = bodies.get_mut(id.index()) {
            body.set_held(false);
        }
        log::debug!("drag of body {} cancelled", id.index());
        Some(id)
    }
}

impl<F: Float> Default for DragController<F> {
    fn default() -> Self {
        Self::new(ReleaseImpulse::Preserve)
    }
}
