use clap::{Parser, Subcommand};
use glam::{Mat4, Vec3};
use orbfield_common::PointerNdc;
use orbfield_kernel::scene::{BURST_LIFETIME, ORB_COUNT};
use orbfield_kernel::Scene;
use orbfield_pick::{pick_scene, Ray};
use orbfield_render::{DebugTextRenderer, RenderView, Renderer};
use orbfield_tools::SceneInspector;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orbfield-cli", about = "CLI tool for orb field operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run a deterministic headless simulation
    Simulate {
        /// Number of frames to advance at a fixed 60 Hz timestep
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// RNG seed for the orb field
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of orbs to spawn
        #[arg(long, default_value_t = ORB_COUNT)]
        orbs: usize,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cast a pointer ray, explode what it hits, and show the burst lifecycle
    Burst {
        /// RNG seed for the orb field
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of orbs to spawn
        #[arg(long, default_value_t = ORB_COUNT)]
        orbs: usize,
        /// Pointer x in NDC, -1 (left) to 1 (right)
        #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
        x: f32,
        /// Pointer y in NDC, -1 (bottom) to 1 (top)
        #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
        y: f32,
    },
}

/// Populate a field and advance it frame by frame at 60 Hz.
fn run_field(seed: u64, orbs: usize, frames: u64) -> Scene {
    let mut scene = Scene::with_seed(seed);
    scene.populate(orbs);
    for i in 0..frames {
        let now = Duration::from_secs_f64(i as f64 / 60.0);
        scene.sweep_expired(now);
        scene.advance(now);
    }
    scene
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("orbfield-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: frame={}", Scene::new().frame());
            println!("pick: {}", orbfield_pick::crate_info());
            println!("render: {}", orbfield_render::crate_info());
            println!("tools: {}", orbfield_tools::crate_info());
        }
        Commands::Simulate {
            frames,
            seed,
            orbs,
            json,
        } => {
            let scene = run_field(seed, orbs, frames);
            let replay = run_field(seed, orbs, frames);
            let hash = scene.state_hash();
            let matches = hash == replay.state_hash();
            let summary = SceneInspector::summary(&scene);

            if json {
                let report = serde_json::json!({
                    "summary": summary,
                    "state_hash": format!("{hash:#018x}"),
                    "replay_matches": matches,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Deterministic simulation: seed={seed}, orbs={orbs}, frames={frames}");
                println!("{summary}");
                println!("State hash: {hash:#018x}");
                println!("Replay: {}", if matches { "OK" } else { "MISMATCH" });
            }
        }
        Commands::Burst { seed, orbs, x, y } => {
            println!("Burst demo: seed={seed}, orbs={orbs}, pointer=({x:.2}, {y:.2})");

            let mut scene = Scene::with_seed(seed);
            scene.populate(orbs);

            // Matrices the desktop camera produces at startup: fov 75,
            // 16:9 viewport, eye at (0, 0, 20) looking down -Z.
            let proj = Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
            let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);
            let ray = Ray::through_pointer((proj * view).inverse(), PointerNdc::new(x, y));

            let hits = pick_scene(&scene, &ray);
            println!("Picked {} orb(s)", hits.len());

            for hit in &hits {
                let particles = scene.explode_orb(hit.id, Duration::ZERO)?;
                println!(
                    "  [{:.8}] exploded at distance {:.2} into {} particles",
                    &hit.id.0.to_string()[..8],
                    hit.distance,
                    particles
                );
            }

            let just_before = BURST_LIFETIME - Duration::from_millis(1);
            let swept = scene.sweep_expired(just_before);
            println!(
                "Sweep at {:?}: {} removed, {} live",
                just_before,
                swept,
                scene.particle_count()
            );
            let swept = scene.sweep_expired(BURST_LIFETIME);
            println!(
                "Sweep at {:?}: {} removed, {} live",
                BURST_LIFETIME,
                swept,
                scene.particle_count()
            );

            let renderer = DebugTextRenderer::new();
            print!("{}", renderer.render(&scene, &RenderView::default()));
        }
    }

    Ok(())
}
