//! A scene: body arena, springs, drag zones, colliders and the drag controller.

use crate::body::{Body, BodyId};
use crate::collision::{Collider, ColliderId, CollisionRegistry};
use crate::config::WorldConfig;
use crate::drag::{DragController, DragEvent, PointerInput};
use crate::error::PhysicsError;
use crate::field::ForceField;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::spring::{SpringConstraint, SpringId};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use core::mem;

/// Owns everything one sketch simulates and steps it in a fixed order.
///
/// Bodies, springs and colliders are addressed by handles into arenas, so
/// listeners and constraints never hold references to each other. Removing
/// a body frees its slot for the next [`add_body`](World::add_body); until
/// then the slot holds an inert anchored body that nothing can grab.
#[derive(Debug)]
pub struct World<F: Float> {
    bodies: AllocVec<Body<F>>,
    vacant: AllocVec<bool>,
    free_bodies: AllocVec<usize>,
    springs: AllocVec<Option<SpringConstraint<F>>>,
    free_springs: AllocVec<usize>,
    fields: AllocVec<ForceField<F>>,
    colliders: CollisionRegistry<F>,
    drag: DragController<F>,
    config: WorldConfig<F>,
}

impl<F: Float> World<F> {
    pub fn new(config: WorldConfig<F>) -> Self {
        World {
            bodies: AllocVec::new(),
            vacant: AllocVec::new(),
            free_bodies: AllocVec::new(),
            springs: AllocVec::new(),
            free_springs: AllocVec::new(),
            fields: AllocVec::new(),
            colliders: CollisionRegistry::new(),
            drag: DragController::new(config.release),
            config,
        }
    }

    /// Store a body, reusing the slot of a removed one when there is one.
    pub fn add_body(&mut self, body: Body<F>) -> BodyId {
        match self.free_bodies.pop() {
            Some(index) => {
                self.bodies[index] = body;
                self.vacant[index] = false;
                BodyId(index)
            }
            None => {
                self.bodies.push(body);
                self.vacant.push(false);
                BodyId(self.bodies.len() - 1)
            }
        }
    }

    /// Take a body out of the simulation, e.g. a pipe that scrolled offscreen.
    ///
    /// Ends a drag holding it and drops its colliders (with every
    /// subscription naming them) and every spring attached to it. The handle
    /// may be given to a later body, so forget it after this call.
    pub fn remove_body(&mut self, id: BodyId) -> Result<Body<F>, PhysicsError> {
        self.try_body(id)?;
        if self.drag.dragged_body() == Some(id) {
            self.drag.cancel(&mut self.bodies);
        }
        for collider in self.colliders.owned_by(id) {
            self.colliders.remove_collider(collider);
        }
        for index in 0..self.springs.len() {
            if self.springs[index].is_some_and(|s| s.anchor == id || s.bob == id) {
                self.remove_spring(SpringId(index));
            }
        }

        let placeholder = Body::anchored(self.bodies[id.index()].position);
        let removed = mem::replace(&mut self.bodies[id.index()], placeholder);
        self.vacant[id.index()] = true;
        self.free_bodies.push(id.index());
        log::debug!("body {} removed", id.index());
        Ok(removed)
    }

    pub fn is_live(&self, id: BodyId) -> bool {
        self.vacant.get(id.index()) == Some(&false)
    }

    pub fn add_spring(&mut self, spring: SpringConstraint<F>) -> Result<SpringId, PhysicsError> {
        self.try_body(spring.anchor)?;
        self.try_body(spring.bob)?;
        let id = match self.free_springs.pop() {
            Some(index) => {
                self.springs[index] = Some(spring);
                SpringId(index)
            }
            None => {
                self.springs.push(Some(spring));
                SpringId(self.springs.len() - 1)
            }
        };
        Ok(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<SpringConstraint<F>> {
        let removed = self.springs.get_mut(id.index())?.take()?;
        self.free_springs.push(id.index());
        Some(removed)
    }

    /// Join two bodies with a new spring.
    pub fn connect(&mut self, anchor: BodyId, bob: BodyId, rest_length: F, stiffness: F) -> Result<SpringId, PhysicsError> {
        let spring = SpringConstraint::new(anchor, bob, rest_length, stiffness)?;
        self.add_spring(spring)
    }

    pub fn add_field(&mut self, field: ForceField<F>) -> usize {
        self.fields.push(field);
        self.fields.len() - 1
    }

    /// Attach a `width` x `height` box collider centred on `owner`.
    pub fn add_collider(&mut self, owner: BodyId, width: F, height: F) -> Result<ColliderId, PhysicsError> {
        self.try_body(owner)?;
        let collider = Collider::new(owner, width, height)?;
        Ok(self.colliders.add_collider(collider))
    }

    /// # Panics
    /// Panics if `id` is out of range or its body was removed.
    pub fn body(&self, id: BodyId) -> &Body<F> {
        match self.try_body(id) {
            Ok(body) => body,
            Err(err) => panic!("{}", err),
        }
    }

    /// # Panics
    /// Panics if `id` is out of range or its body was removed.
    pub fn body_mut(&mut self, id: BodyId) -> &mut Body<F> {
        if let Err(err) = self.try_body(id) {
            panic!("{}", err);
        }
        &mut self.bodies[id.index()]
    }

    pub fn try_body(&self, id: BodyId) -> Result<&Body<F>, PhysicsError> {
        match self.vacant.get(id.index()) {
            Some(false) => Ok(&self.bodies[id.index()]),
            Some(true) => Err(PhysicsError::BodyRemoved { index: id.index() }),
            None => Err(PhysicsError::BodyOutOfBounds {
                index: id.index(),
                count: self.bodies.len(),
            }),
        }
    }

    /// Every slot, indexed by [`BodyId::index`], including vacant ones.
    pub fn bodies(&self) -> &[Body<F>] { &self.bodies }
    pub fn bodies_mut(&mut self) -> &mut [Body<F>] { &mut self.bodies }

    /// Live bodies with their handles.
    pub fn live_bodies(&self) -> impl Iterator<Item = (BodyId, &Body<F>)> + '_ {
        self.vacant
            .iter()
            .enumerate()
            .filter(|&(_, &vacant)| !vacant)
            .map(|(index, _)| (BodyId(index), &self.bodies[index]))
    }

    pub fn body_count(&self) -> usize { self.bodies.len() - self.free_bodies.len() }

    pub fn spring(&self, id: SpringId) -> Option<&SpringConstraint<F>> {
        self.springs.get(id.index()).and_then(Option::as_ref)
    }

    pub fn springs(&self) -> impl Iterator<Item = &SpringConstraint<F>> + '_ {
        self.springs.iter().flatten()
    }

    pub fn spring_count(&self) -> usize { self.springs.len() - self.free_springs.len() }

    pub fn fields(&self) -> &[ForceField<F>] { &self.fields }

    pub fn colliders(&self) -> &CollisionRegistry<F> { &self.colliders }
    pub fn colliders_mut(&mut self) -> &mut CollisionRegistry<F> { &mut self.colliders }

    pub fn drag(&self) -> &DragController<F> { &self.drag }

    pub fn config(&self) -> &WorldConfig<F> { &self.config }

    /// Replace the configuration. The drag release mode follows it.
    pub fn set_config(&mut self, config: WorldConfig<F>) {
        self.drag.set_release_mode(config.release);
        self.config = config;
    }

    /// Position of every slot, indexed by [`BodyId::index`].
    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    /// Overlap test between two colliders at current positions.
    pub fn check_overlap(&self, a: ColliderId, b: ColliderId) -> bool {
        self.colliders.check_overlap(&self.bodies, a, b)
    }

    /// Drop any drag session without applying a release impulse.
    pub fn cancel_drag(&mut self) -> Option<BodyId> {
        self.drag.cancel(&mut self.bodies)
    }

    /// Advance one tick.
    ///
    /// Each sub-step accumulates every force (springs, gravity scaled per
    /// body, wind, drag zones, floor friction), integrates every free body, bounces off the
    /// walls and then lets the drag controller move the held body. Colliders
    /// are evaluated once, after the last sub-step, and the fired
    /// (subject, target) pairs are returned so callers can remove
    /// subscriptions or colliders afterwards.
    pub fn step<O: StepObserver>(
        &mut self,
        input: &PointerInput<F>,
        observer: &mut O,
    ) -> AllocVec<(ColliderId, ColliderId)> {
        let config = self.config;

        for sub in 0..config.sub_steps {
            for spring in self.springs.iter().flatten() {
                spring.apply(&mut self.bodies);
            }

            for body in self.bodies.iter_mut() {
                body.apply_force(config.gravity.scale(body.mass() * body.config().gravity_scale));
                body.apply_force(config.wind);
                for field in self.fields.iter() {
                    field.apply(body);
                }
                if let Some(bounds) = config.bounds {
                    if config.floor_friction > F::zero() && body.touches_floor(&bounds) {
                        body.apply_friction(config.floor_friction);
                    }
                }
            }

            for body in self.bodies.iter_mut() {
                body.integrate();
                if let Some(bounds) = config.bounds {
                    body.bounce_within(&bounds, config.restitution);
                }
            }
            observer.on_integrate(sub);

            match self.drag.update(input, &mut self.bodies) {
                Some(DragEvent::Grabbed(id)) => observer.on_grab(id),
                Some(DragEvent::Released { body, .. }) => observer.on_release(body),
                None => {}
            }
        }

        let hits = self.evaluate_collisions(observer);
        observer.on_step_complete();
        hits
    }

    /// Fire every collision listener whose pair overlaps right now.
    pub fn evaluate_collisions<O: StepObserver>(&mut self, observer: &mut O) -> AllocVec<(ColliderId, ColliderId)> {
        let mut fired = AllocVec::new();
        for subject in self.colliders.subjects() {
            for target in self.colliders.evaluate_all(&self.bodies, subject) {
                observer.on_collision(subject, target);
                fired.push((subject, target));
            }
        }
        fired
    }
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        Self::new(WorldConfig::new())
    }
}
