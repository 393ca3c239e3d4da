//! Picking: pointer rays and ray/sphere intersection against live orbs.
//!
//! # Invariants
//! - Picking is a pure read of scene and camera; it never mutates either.
//! - Hits come back ordered nearest-first along the ray.

mod ray;

pub use ray::{pick_scene, ray_sphere, Hit, Ray};

pub fn crate_info() -> &'static str {
    "orbfield-pick v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("pick"));
    }
}
