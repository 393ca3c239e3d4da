use glam::{Mat4, Vec3};
use orbfield_common::{OrbId, PointerNdc};
use orbfield_kernel::scene::ORB_RADIUS;
use orbfield_kernel::Scene;

/// A world-space ray with a normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Cast a world-space ray through a pointer position.
    ///
    /// Unprojects the pointer onto the near plane (depth 0) and far plane
    /// (depth 1) with the inverse view-projection matrix and aims from one
    /// to the other.
    pub fn through_pointer(inv_view_proj: Mat4, pointer: PointerNdc) -> Self {
        let near = inv_view_proj.project_point3(Vec3::new(pointer.x, pointer.y, 0.0));
        let far = inv_view_proj.project_point3(Vec3::new(pointer.x, pointer.y, 1.0));
        Self {
            origin: near,
            dir: (far - near).normalize(),
        }
    }

    /// Point `t` units along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Nearest non-negative intersection distance of a ray with a sphere, if
/// any. Assumes `ray.dir` is normalized.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let half_b = oc.dot(ray.dir);
    let c = oc.length_squared() - radius * radius;
    let disc = half_b * half_b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -half_b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    // Ray starts inside the sphere; the exit point still counts.
    let far = -half_b + sqrt_disc;
    (far >= 0.0).then_some(far)
}

/// One picked orb with its distance along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: OrbId,
    pub distance: f32,
}

/// Intersect the ray with every live orb. Hits come back nearest-first.
pub fn pick_scene(scene: &Scene, ray: &Ray) -> Vec<Hit> {
    let mut hits: Vec<Hit> = scene
        .orbs()
        .iter()
        .filter_map(|(id, orb)| {
            ray_sphere(ray, orb.position, ORB_RADIUS).map(|distance| Hit { id: *id, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    tracing::trace!(hits = hits.len(), "pick complete");
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Matrices the desktop app would build: fov 75, camera at (0, 0, 20)
    /// looking at the origin.
    fn inv_view_proj() -> Mat4 {
        let proj = Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);
        (proj * view).inverse()
    }

    fn axial_ray(z: f32) -> Ray {
        Ray {
            origin: Vec3::new(0.0, 0.0, z),
            dir: Vec3::NEG_Z,
        }
    }

    #[test]
    fn axis_aligned_hit_distance() {
        let t = ray_sphere(&axial_ray(5.0), Vec3::ZERO, 1.0);
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn offset_sphere_misses() {
        let t = ray_sphere(&axial_ray(5.0), Vec3::new(3.0, 0.0, 0.0), 1.0);
        assert_eq!(t, None);
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let t = ray_sphere(&axial_ray(5.0), Vec3::new(0.0, 0.0, 10.0), 1.0);
        assert_eq!(t, None);
    }

    #[test]
    fn origin_inside_sphere_hits_exit() {
        let t = ray_sphere(&axial_ray(0.0), Vec3::ZERO, 1.0);
        assert_eq!(t, Some(1.0));
    }

    #[test]
    fn center_pointer_aims_at_scene_center() {
        let ray = Ray::through_pointer(inv_view_proj(), PointerNdc::new(0.0, 0.0));
        assert!(ray.origin.x.abs() < 1e-4);
        assert!(ray.origin.y.abs() < 1e-4);
        // Origin sits on the near plane just in front of the camera.
        assert!(ray.origin.z > 19.0 && ray.origin.z < 20.0);
        assert!(ray.dir.z < -0.999);
    }

    #[test]
    fn center_pointer_picks_centered_orb() {
        let mut scene = Scene::with_seed(1);
        let id = scene.spawn_orb(Vec3::ZERO);
        let ray = Ray::through_pointer(inv_view_proj(), PointerNdc::new(0.0, 0.0));

        let hits = pick_scene(&scene, &ray);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, id);
        // The hit point lies on the orb surface.
        let point = ray.point_at(hits[0].distance);
        assert!((point.length() - ORB_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn corner_pointer_misses_centered_orb() {
        let mut scene = Scene::with_seed(1);
        scene.spawn_orb(Vec3::ZERO);
        let ray = Ray::through_pointer(inv_view_proj(), PointerNdc::new(0.9, 0.9));
        assert!(pick_scene(&scene, &ray).is_empty());
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let mut scene = Scene::with_seed(1);
        let far = scene.spawn_orb(Vec3::ZERO);
        let mid = scene.spawn_orb(Vec3::new(0.0, 0.0, 5.0));
        let near = scene.spawn_orb(Vec3::new(0.0, 0.0, 10.0));

        let hits = pick_scene(&scene, &axial_ray(20.0));
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, near);
        assert_eq!(hits[1].id, mid);
        assert_eq!(hits[2].id, far);
        assert!(hits[0].distance < hits[1].distance);
        assert!(hits[1].distance < hits[2].distance);
    }

    #[test]
    fn orbs_behind_the_ray_are_not_picked() {
        let mut scene = Scene::with_seed(1);
        let ahead = scene.spawn_orb(Vec3::ZERO);
        scene.spawn_orb(Vec3::new(0.0, 0.0, 30.0));

        let hits = pick_scene(&scene, &axial_ray(20.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ahead);
    }
}
