use glam::Vec3;
use orbfield_kernel::Scene;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface.
///
/// The renderer reads scene state and a view configuration, then produces
/// output. It never mutates the scene — scene truth is kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene state and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable string representation of the scene. Useful for
/// CLI output, logging, and testing the render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (frame={}, seed={}) ===\n",
            scene.frame(),
            scene.seed()
        ));
        out.push_str(&format!(
            "Orbs: {}, particles: {} in {} burst(s)\n",
            scene.orb_count(),
            scene.particle_count(),
            scene.bursts().len()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        for (id, orb) in scene.orbs() {
            out.push_str(&format!(
                "  [{:.8}] pos=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2})\n",
                &id.0.to_string()[..8],
                orb.position.x,
                orb.position.y,
                orb.position.z,
                orb.color.r,
                orb.color.g,
                orb.color.b
            ));
        }
        for burst in scene.bursts() {
            out.push_str(&format!(
                "  burst: {} particles, expires at {:?}\n",
                burst.particles.len(),
                burst.expires_at
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new();
        let renderer = DebugTextRenderer::new();
        let view = RenderView::default();
        let output = renderer.render(&scene, &view);

        assert!(output.contains("frame=0"));
        assert!(output.contains("Orbs: 0"));
    }

    #[test]
    fn debug_renderer_lists_orbs() {
        let mut scene = Scene::with_seed(3);
        scene.spawn_orb(Vec3::ZERO);
        scene.spawn_orb(Vec3::new(1.0, 2.0, 3.0));

        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &RenderView::default());

        assert!(output.contains("Orbs: 2"));
        assert!(output.contains("pos="));
        assert!(output.contains("color="));
    }

    #[test]
    fn debug_renderer_shows_bursts() {
        let mut scene = Scene::with_seed(3);
        let id = scene.spawn_orb(Vec3::ZERO);
        scene.explode_orb(id, Duration::ZERO).unwrap();

        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &RenderView::default());

        assert!(output.contains("Orbs: 0"));
        assert!(output.contains("particles: 10"));
        assert!(output.contains("burst: 10 particles"));
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 75.0);
        assert_eq!(view.eye, Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(view.target, Vec3::ZERO);
    }
}
