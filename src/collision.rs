//! Axis-aligned box colliders and per-pair collision listeners.
//!
//! Boxes are centred on their owning body and read its position at the moment
//! of the test, so a collider is never stale. The test is a plain overlap
//! check at the current step: a body moving further than a collider's width
//! in one step can pass straight through it.

use crate::body::{Body, BodyId};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::boxed::Box;
use alloc::vec::Vec as AllocVec;
use core::fmt;
use core::mem;
use hashbrown::HashMap;

/// Handle to a collider in a [`CollisionRegistry`]. Slots of removed
/// colliders are reused, so drop a handle once its collider is removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(usize);

impl ColliderId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Listener invoked when its (subject, target) pair overlaps.
pub type CollisionCallback = Box<dyn FnMut()>;

/// A box centred on a body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collider<F: Float> {
    pub owner: BodyId,
    pub half_width: F,
    pub half_height: F,
}

impl<F: Float> Collider<F> {
    /// Box of full `width` x `height` around `owner`.
    pub fn new(owner: BodyId, width: F, height: F) -> Result<Self, PhysicsError> {
        Self::from_half_extents(owner, width * F::half(), height * F::half())
    }

    pub fn from_half_extents(owner: BodyId, half_width: F, half_height: F) -> Result<Self, PhysicsError> {
        if !(half_width >= F::zero() && half_height >= F::zero()) {
            return Err(PhysicsError::InvalidExtents);
        }
        Ok(Collider { owner, half_width, half_height })
    }

    /// Current centre, or `None` if the owner is not in `bodies`.
    pub fn center(&self, bodies: &[Body<F>]) -> Option<Vec2<F>> {
        bodies.get(self.owner.index()).map(|b| b.position)
    }

    /// Separating-axis test on half extents. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Collider<F>, bodies: &[Body<F>]) -> bool {
        let (a, b) = match (self.center(bodies), other.center(bodies)) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        (a.x - b.x).abs() <= self.half_width + other.half_width
            && (a.y - b.y).abs() <= self.half_height + other.half_height
    }
}

/// Listener plus its position in the two per-collider lists that name it.
struct Subscription {
    callback: CollisionCallback,
    target_slot: usize,
    subject_slot: usize,
}

/// A collider slot and the pairs it takes part in.
struct Slot<F: Float> {
    collider: Option<Collider<F>>,
    /// Targets this collider listens for, in firing order.
    targets: AllocVec<ColliderId>,
    /// Colliders listening for this one.
    subjects: AllocVec<ColliderId>,
}

/// Arena of colliders plus the listeners registered between them.
///
/// Subscriptions are keyed by an ordered (subject, target) pair; at most one
/// callback per pair, and subscribing again replaces it. Nothing expires on
/// its own: owners unsubscribe explicitly, or remove a collider to drop
/// every pair that names it.
///
/// Subscribing and unsubscribing are O(1) amortized. Each collider keeps the
/// list of its targets and subjects; an unsubscribe swaps the last entry of
/// those lists into the freed place, so the firing order of the remaining
/// targets can change. The order never depends on hashing.
pub struct CollisionRegistry<F: Float> {
    slots: AllocVec<Slot<F>>,
    free: AllocVec<usize>,
    live: usize,
    subscriptions: HashMap<(ColliderId, ColliderId), Subscription>,
}

impl<F: Float> CollisionRegistry<F> {
    pub fn new() -> Self {
        CollisionRegistry {
            slots: AllocVec::new(),
            free: AllocVec::new(),
            live: 0,
            subscriptions: HashMap::new(),
        }
    }

    /// Store a collider, reusing the slot of a removed one when there is one.
    pub fn add_collider(&mut self, collider: Collider<F>) -> ColliderId {
        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index].collider = Some(collider);
                ColliderId(index)
            }
            None => {
                self.slots.push(Slot {
                    collider: Some(collider),
                    targets: AllocVec::new(),
                    subjects: AllocVec::new(),
                });
                ColliderId(self.slots.len() - 1)
            }
        };
        self.live += 1;
        log::debug!("collider {} added for body {}", id.0, collider.owner.index());
        id
    }

    /// Remove a collider and every subscription in which it is subject or target.
    ///
    /// The id may be handed out again by a later [`add_collider`](Self::add_collider).
    pub fn remove_collider(&mut self, id: ColliderId) -> Option<Collider<F>> {
        let removed = self.slots.get_mut(id.0)?.collider.take()?;
        for target in mem::take(&mut self.slots[id.0].targets) {
            if let Some(sub) = self.subscriptions.remove(&(id, target)) {
                self.detach_subject(target, sub.subject_slot);
            }
        }
        for subject in mem::take(&mut self.slots[id.0].subjects) {
            if let Some(sub) = self.subscriptions.remove(&(subject, id)) {
                self.detach_target(subject, sub.target_slot);
            }
        }
        self.free.push(id.0);
        self.live -= 1;
        log::debug!("collider {} removed", id.0);
        Some(removed)
    }

    /// Colliders attached to `owner`, ascending.
    pub fn owned_by(&self, owner: BodyId) -> AllocVec<ColliderId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.collider.is_some_and(|c| c.owner == owner))
            .map(|(index, _)| ColliderId(index))
            .collect()
    }

    pub fn collider(&self, id: ColliderId) -> Option<&Collider<F>> {
        self.slots.get(id.0).and_then(|slot| slot.collider.as_ref())
    }

    pub fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider<F>> {
        self.slots.get_mut(id.0).and_then(|slot| slot.collider.as_mut())
    }

    pub fn try_collider(&self, id: ColliderId) -> Result<&Collider<F>, PhysicsError> {
        self.collider(id).ok_or(PhysicsError::ColliderOutOfBounds {
            index: id.0,
            count: self.slots.len(),
        })
    }

    /// Number of live colliders.
    pub fn collider_count(&self) -> usize {
        self.live
    }

    /// Overlap test between two registered colliders. Removed colliders never overlap.
    pub fn check_overlap(&self, bodies: &[Body<F>], a: ColliderId, b: ColliderId) -> bool {
        match (self.collider(a), self.collider(b)) {
            (Some(a), Some(b)) => a.overlaps(b, bodies),
            _ => false,
        }
    }

    /// Register `callback` for `subject` touching `target`.
    ///
    /// Returns `Ok(true)` if an earlier callback for the same pair was
    /// replaced, and an error if either collider is not live.
    ///
    /// Callbacks take no arguments and cannot reach the bodies: a listener
    /// that should move something (the ground stopping the bird, say) records
    /// the hit, and the caller acts on the pairs returned by
    /// [`evaluate_all`](Self::evaluate_all) or
    /// [`World::step`](crate::world::World::step).
    pub fn subscribe<C>(&mut self, subject: ColliderId, target: ColliderId, callback: C) -> Result<bool, PhysicsError>
    where
        C: FnMut() + 'static,
    {
        self.try_collider(subject)?;
        self.try_collider(target)?;
        log::trace!("subscribe {} -> {}", subject.0, target.0);

        if let Some(sub) = self.subscriptions.get_mut(&(subject, target)) {
            sub.callback = Box::new(callback);
            return Ok(true);
        }
        let target_slot = self.slots[subject.0].targets.len();
        self.slots[subject.0].targets.push(target);
        let subject_slot = self.slots[target.0].subjects.len();
        self.slots[target.0].subjects.push(subject);
        self.subscriptions.insert(
            (subject, target),
            Subscription { callback: Box::new(callback), target_slot, subject_slot },
        );
        Ok(false)
    }

    /// Drop the listener for a pair. Absent pairs are ignored.
    ///
    /// Returns true if a listener was removed.
    pub fn unsubscribe(&mut self, subject: ColliderId, target: ColliderId) -> bool {
        let Some(sub) = self.subscriptions.remove(&(subject, target)) else {
            return false;
        };
        self.detach_target(subject, sub.target_slot);
        self.detach_subject(target, sub.subject_slot);
        log::trace!("unsubscribe {} -> {}", subject.0, target.0);
        true
    }

    /// Remove entry `target_slot` from `subject`'s target list.
    fn detach_target(&mut self, subject: ColliderId, target_slot: usize) {
        let targets = &mut self.slots[subject.0].targets;
        targets.swap_remove(target_slot);
        if let Some(&moved) = targets.get(target_slot) {
            if let Some(sub) = self.subscriptions.get_mut(&(subject, moved)) {
                sub.target_slot = target_slot;
            }
        }
    }

    /// Remove entry `subject_slot` from `target`'s subject list.
    fn detach_subject(&mut self, target: ColliderId, subject_slot: usize) {
        let subjects = &mut self.slots[target.0].subjects;
        subjects.swap_remove(subject_slot);
        if let Some(&moved) = subjects.get(subject_slot) {
            if let Some(sub) = self.subscriptions.get_mut(&(moved, target)) {
                sub.subject_slot = subject_slot;
            }
        }
    }

    pub fn is_subscribed(&self, subject: ColliderId, target: ColliderId) -> bool {
        self.subscriptions.contains_key(&(subject, target))
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Colliders that currently have at least one listener, ascending.
    pub fn subjects(&self) -> AllocVec<ColliderId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.targets.is_empty())
            .map(|(index, _)| ColliderId(index))
            .collect()
    }

    /// Test every pair keyed by `subject` and fire the listeners that overlap.
    ///
    /// All tests run before any callback, so the result does not depend on
    /// what the callbacks do. Returns the targets that fired, in firing
    /// order; owners remove subscriptions after this returns.
    pub fn evaluate_all(&mut self, bodies: &[Body<F>], subject: ColliderId) -> AllocVec<ColliderId> {
        let Some(slot) = self.slots.get(subject.0) else {
            return AllocVec::new();
        };
        let hits: AllocVec<ColliderId> = slot
            .targets
            .iter()
            .copied()
            .filter(|&target| self.check_overlap(bodies, subject, target))
            .collect();

        for &target in &hits {
            if let Some(sub) = self.subscriptions.get_mut(&(subject, target)) {
                log::trace!("collision {} -> {}", subject.0, target.0);
                (sub.callback)();
            }
        }
        hits
    }
}

impl<F: Float> Default for CollisionRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> fmt::Debug for CollisionRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionRegistry")
            .field("colliders", &self.collider_count())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
