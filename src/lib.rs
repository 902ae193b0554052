//! Forces, springs, box colliders and pointer dragging for 2D physics sketches.
//!
//! `nudge` is the simulation layer under small interactive sketches: falling
//! bodies, spring ropes, drag zones, a flappy-bird clone. Rendering and input
//! polling stay with the caller, which feeds in a pointer sample per tick and
//! reads positions back out.
//!
//! # Features
//!
//! - **Bodies**: point masses with clamped acceleration, speed caps and per-axis damping
//! - **Springs**: Hookean constraints with equal and opposite forces, plus spring chains
//! - **Drag zones**: rectangular regions resisting motion with squared-speed drag
//! - **Colliders**: axis-aligned boxes with per-pair collision listeners
//! - **Dragging**: one-body-at-a-time pointer grabbing with a flick on release
//! - **Oscillators**: travelling waves and damped rotation
//! - **Observable**: monitor world steps via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod rect;
pub mod body;
pub mod collision;
pub mod spring;
pub mod field;
pub mod drag;
pub mod chain;
pub mod oscillator;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use rect::Rect;
pub use body::{Body, BodyId};
pub use collision::{Collider, ColliderId, CollisionCallback, CollisionRegistry};
pub use spring::{SpringConstraint, SpringId};
pub use field::ForceField;
pub use drag::{DragController, DragEvent, DragSession, DragState, PointerInput, ReleaseImpulse};
pub use chain::{SpringChain, ChainConfig};
pub use oscillator::{AngularMotion, Wave};
pub use world::World;
pub use config::{BodyConfig, WorldConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
