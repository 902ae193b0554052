//! Spring chains (ropes) built from bodies joined end to end.

use crate::body::{Body, BodyId};
use crate::config::BodyConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::spring::SpringId;
use crate::vec::Vec2;
use crate::world::World;
use alloc::vec::Vec as AllocVec;

/// Configuration for creating a chain.
pub struct ChainConfig<F: Float> {
    pub stiffness: F,
    pub body_mass: F,
    /// Spring rest length. `None` uses the initial spacing between bodies.
    pub rest_length: Option<F>,
    /// Anchor every n-th body, starting with the first. 0 anchors nothing.
    pub anchor_every: usize,
    pub body: BodyConfig<F>,
}

impl<F: Float> Default for ChainConfig<F> {
    fn default() -> Self {
        ChainConfig {
            stiffness: F::from_f32(0.05),
            body_mass: F::one(),
            rest_length: None,
            anchor_every: 0,
            body: BodyConfig::new(),
        }
    }
}

/// Handles to the bodies and springs of a chain living in a [`World`].
#[derive(Clone, Debug)]
pub struct SpringChain {
    bodies: AllocVec<BodyId>,
    springs: AllocVec<SpringId>,
}

impl SpringChain {
    /// Add `segments + 1` bodies evenly spaced from `start` to `end` and a
    /// spring between each neighbouring pair.
    ///
    /// Chains of stiff springs want `WorldConfig::sub_steps` around 8.
    pub fn build<F: Float>(
        world: &mut World<F>,
        start: Vec2<F>,
        end: Vec2<F>,
        segments: usize,
        config: &ChainConfig<F>,
    ) -> Result<Self, PhysicsError> {
        let segments = segments.max(1);
        let spacing = start.distance(end) / F::from_f32(segments as f32);
        let rest_length = config.rest_length.unwrap_or(spacing);

        let mut bodies = AllocVec::with_capacity(segments + 1);
        for i in 0..=segments {
            let t = F::from_f32(i as f32) / F::from_f32(segments as f32);
            let mut body = Body::try_new(start.lerp(end, t), config.body_mass)?.with_config(config.body);
            if config.anchor_every > 0 && i % config.anchor_every == 0 {
                body.anchor();
            }
            bodies.push(world.add_body(body));
        }

        let mut springs = AllocVec::with_capacity(segments);
        for pair in bodies.windows(2) {
            springs.push(world.connect(pair[0], pair[1], rest_length, config.stiffness)?);
        }

        Ok(SpringChain { bodies, springs })
    }

    pub fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }

    pub fn springs(&self) -> &[SpringId] {
        &self.springs
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.springs.len()
    }

    pub fn positions<F: Float>(&self, world: &World<F>) -> AllocVec<Vec2<F>> {
        self.bodies.iter().map(|&id| world.body(id).position).collect()
    }

    /// Sum of the distances between neighbouring bodies.
    pub fn total_length<F: Float>(&self, world: &World<F>) -> F {
        self.bodies
            .windows(2)
            .fold(F::zero(), |sum, pair| sum + world.body(pair[0]).position.distance(world.body(pair[1]).position))
    }
}
