//! Scene kernel: authoritative orb registry, particle bursts, and the
//! per-frame animation step.
//!
//! # Invariants
//! - A live orb exists in exactly one place, the scene registry; renderers
//!   derive draw data from it every frame and hold no copies.
//! - All state mutations flow through explicit operations.
//! - All randomness flows through the scene's seeded RNG, so the same seed
//!   and operation sequence reproduce the same state.

pub mod scene;

pub use scene::{Orb, Particle, ParticleBurst, Scene, SceneError, SceneEvent};
