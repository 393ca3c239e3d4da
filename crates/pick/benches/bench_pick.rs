use std::hint::black_box;
use std::time::Instant;

use glam::{Mat4, Vec3};
use orbfield_common::PointerNdc;
use orbfield_kernel::Scene;
use orbfield_pick::{pick_scene, ray_sphere, Ray};

fn make_scene(orb_count: usize) -> Scene {
    let mut scene = Scene::with_seed(42);
    scene.populate(orb_count);
    scene
}

fn inv_view_proj() -> Mat4 {
    let proj = Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);
    (proj * view).inverse()
}

fn bench_ray_sphere(iterations: usize) {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 20.0),
        dir: Vec3::NEG_Z,
    };
    let start = Instant::now();
    for i in 0..iterations {
        // Sweep the sphere sideways so hits and misses interleave
        let x = (i % 64) as f32 * 0.1 - 3.2;
        let _ = black_box(ray_sphere(black_box(&ray), Vec3::new(x, 0.0, 0.0), 1.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  ray/sphere ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_pick_scene(orb_count: usize, iterations: usize) {
    let scene = make_scene(orb_count);
    let inv = inv_view_proj();

    let start = Instant::now();
    for i in 0..iterations {
        // Simulate pointer sweeping across the viewport
        let ndc = PointerNdc::new((i % 100) as f32 / 50.0 - 1.0, 0.0);
        let ray = Ray::through_pointer(inv, ndc);
        let _ = black_box(pick_scene(black_box(&scene), black_box(&ray)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  pick ({orb_count} orbs, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Pick Benchmarks ===\n");

    println!("Ray/sphere intersection:");
    bench_ray_sphere(1000000);

    println!("\nFull-scene pick:");
    bench_pick_scene(30, 100000);
    bench_pick_scene(300, 10000);
    bench_pick_scene(3000, 1000);

    println!("\n=== Done ===");
}
