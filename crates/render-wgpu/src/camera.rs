use glam::{Mat4, Vec3};

/// Camera depth with no scroll applied.
pub const BASE_DEPTH: f32 = 20.0;

/// World units of dolly per virtual scroll pixel.
pub const SCROLL_DEPTH_FACTOR: f32 = 0.01;

/// Fixed-axis dolly camera: sits on +Z looking down -Z at the field.
/// The scroll offset sets its depth absolutely; nothing else moves it.
pub struct OrbCamera {
    pub position: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, BASE_DEPTH),
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbCamera {
    /// Dolly to the depth for an accumulated scroll offset. Absolute, not
    /// additive: the same offset always lands on the same depth.
    pub fn apply_scroll(&mut self, offset: f32) {
        self.position.z = BASE_DEPTH + SCROLL_DEPTH_FACTOR * offset;
    }

    /// Update the aspect ratio from a viewport size in pixels.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Inverse view-projection, the matrix pointer picking unprojects with.
    pub fn inv_view_projection(&self) -> Mat4 {
        self.view_projection().inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = OrbCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, BASE_DEPTH));
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn scroll_sets_depth_absolutely() {
        let mut cam = OrbCamera::default();
        cam.apply_scroll(300.0);
        assert_eq!(cam.position.z, 23.0);

        // Re-applying the same offset does not dolly further.
        cam.apply_scroll(300.0);
        assert_eq!(cam.position.z, 23.0);

        cam.apply_scroll(0.0);
        assert_eq!(cam.position.z, BASE_DEPTH);
    }

    #[test]
    fn aspect_follows_viewport() {
        let mut cam = OrbCamera::default();
        cam.set_aspect(800, 600);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);

        // Degenerate sizes clamp instead of dividing by zero.
        cam.set_aspect(0, 0);
        assert_eq!(cam.aspect, 1.0);
    }
}
