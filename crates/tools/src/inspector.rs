use orbfield_common::OrbId;
use orbfield_kernel::Scene;
use serde::Serialize;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against the scene state for debugging, the
/// desktop overlay, and the headless CLI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &Scene) -> SceneSummary {
        SceneSummary {
            frame: scene.frame(),
            seed: scene.seed(),
            orb_count: scene.orb_count(),
            particle_count: scene.particle_count(),
            pending_bursts: scene.bursts().len(),
            pending_events: scene.events().len(),
        }
    }

    /// Get the state of a specific orb.
    pub fn inspect_orb(scene: &Scene, id: OrbId) -> Option<OrbInfo> {
        scene.orb(id).map(|orb| OrbInfo {
            id,
            position: orb.position.to_array(),
            rotation: orb.rotation.to_array(),
            color: orb.color.to_array(),
            phase: orb.phase,
        })
    }

    /// List all orb ids in the scene.
    pub fn list_orbs(scene: &Scene) -> Vec<OrbId> {
        scene.orbs().keys().copied().collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub seed: u64,
    pub orb_count: usize,
    pub particle_count: usize,
    pub pending_bursts: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} seed={} orbs={} particles={} bursts={} pending_events={}",
            self.frame,
            self.seed,
            self.orb_count,
            self.particle_count,
            self.pending_bursts,
            self.pending_events
        )
    }
}

/// Detailed info about a single orb.
#[derive(Debug, Clone, Serialize)]
pub struct OrbInfo {
    pub id: OrbId,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub color: [f32; 3],
    pub phase: f32,
}

impl std::fmt::Display for OrbInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Orb [{:.8}] pos=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2}) phase={:.0}",
            &self.id.0.to_string()[..8],
            self.position[0],
            self.position[1],
            self.position[2],
            self.color[0],
            self.color[1],
            self.color[2],
            self.phase,
        )
    }
}
