//! Developer tooling: scene inspector and frame timing.
//!
//! # Invariants
//! - Tools read scene state; they never mutate it.

mod inspector;
mod timing;

pub use inspector::{OrbInfo, SceneInspector, SceneSummary};
pub use timing::FrameTimer;

pub fn crate_info() -> &'static str {
    "orbfield-tools v0.1.0"
}
