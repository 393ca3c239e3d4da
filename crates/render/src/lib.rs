//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers cannot mutate scene truth directly.
//! - Render state derives from scene state and view.
//!
//! The trait ships with a debug text backend for the CLI, logging, and
//! tests; the interactive wgpu backend lives in its own crate.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "orbfield-render v0.1.0"
}
