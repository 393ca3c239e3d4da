//! wgpu render backend for the orb field.
//!
//! Renders a procedural gradient background, instanced orb spheres, and
//! instanced burst particles. The camera is a fixed-axis dolly on +Z driven
//! by the scroll offset.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Draw instances are rebuilt from the scene registry every frame; the
//!   renderer keeps no per-orb state of its own.

mod camera;
mod gpu;
mod mesh;
mod shaders;

pub use camera::{OrbCamera, BASE_DEPTH, SCROLL_DEPTH_FACTOR};
pub use gpu::WgpuRenderer;
