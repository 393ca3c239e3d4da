use glam::Vec3;
use orbfield_common::{OrbId, Rgb, SeededRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Number of orbs spawned by a default field.
pub const ORB_COUNT: usize = 30;

/// Orb positions are drawn uniformly from `[-extent, extent)` per axis.
pub const FIELD_HALF_EXTENT: f32 = 10.0;

/// World-space radius of every orb; picking and rendering share it.
pub const ORB_RADIUS: f32 = 1.0;

/// World-space radius of a burst particle.
pub const PARTICLE_RADIUS: f32 = 0.1;

/// Particles spawned per exploded orb.
pub const PARTICLES_PER_BURST: usize = 10;

/// How long a burst lingers before the sweep removes it.
pub const BURST_LIFETIME: Duration = Duration::from_millis(1000);

/// Hover color, `#ffcc00`. Applied permanently; nothing reverts it.
pub const HIGHLIGHT_COLOR: Rgb = Rgb { r: 1.0, g: 0.8, b: 0.0 };

const SPIN_MIN: f32 = 0.01;
const SPIN_JITTER: f32 = 0.02;
const FLOAT_RATE: f32 = 2.0;
const FLOAT_AMPLITUDE: f32 = 0.02;
const SCROLL_BOB_RATE: f32 = 0.01;
const SCROLL_BOB_AMPLITUDE: f32 = 0.1;

/// A glowing sphere in the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Orb {
    pub position: Vec3,
    /// Euler angles in radians; only x and y spin.
    pub rotation: Vec3,
    pub color: Rgb,
    pub emissive: Rgb,
    /// Spawn index as f32; staggers the floating oscillation so the field
    /// does not bob in lockstep. Fixed at creation, stable across removals.
    pub phase: f32,
}

/// One fragment of an exploded orb. Velocity is assigned at spawn but never
/// integrated; particles stay where they appeared until their burst expires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Rgb,
}

/// The particles of one explosion plus their shared removal deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub particles: Vec<Particle>,
    pub expires_at: Duration,
}

/// An event record produced by every mutation to the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Orb was added to the registry.
    OrbSpawned { id: OrbId },
    /// Orb was removed and replaced by a particle burst.
    OrbExploded { id: OrbId, particles: usize },
    /// A burst passed its deadline and was swept.
    BurstExpired { particles: usize },
}

/// Errors from scene operations that take caller-supplied ids.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("orb not found: {0:?}")]
    OrbNotFound(OrbId),
}

/// The authoritative scene state.
///
/// All mutations go through explicit operations. The kernel owns the truth;
/// renderers, picking, and tooling derive from it.
///
/// Uses BTreeMap for deterministic iteration order across all platforms.
/// Every random draw comes from the scene's own seeded RNG, ids included, so
/// two scenes built with the same seed and operation sequence are identical.
#[derive(Debug, Clone)]
pub struct Scene {
    orbs: BTreeMap<OrbId, Orb>,
    bursts: Vec<ParticleBurst>,
    rng: SeededRng,
    seed: u64,
    frame: u64,
    spawned_total: u64,
    /// Append-only event log of all mutations.
    event_log: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Scene {
    /// Create an empty scene seeded with 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with a specific seed for reproducible fields.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            orbs: BTreeMap::new(),
            bursts: Vec::new(),
            rng: SeededRng::new(seed),
            seed,
            frame: 0,
            spawned_total: 0,
            event_log: Vec::new(),
        }
    }

    /// Seed this scene was constructed with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of live orbs.
    pub fn orb_count(&self) -> usize {
        self.orbs.len()
    }

    /// Number of live particles across all pending bursts.
    pub fn particle_count(&self) -> usize {
        self.bursts.iter().map(|b| b.particles.len()).sum()
    }

    /// Read-only access to all orbs (BTreeMap for deterministic iteration).
    pub fn orbs(&self) -> &BTreeMap<OrbId, Orb> {
        &self.orbs
    }

    /// Get a reference to one orb.
    pub fn orb(&self, id: OrbId) -> Option<&Orb> {
        self.orbs.get(&id)
    }

    /// Read-only access to pending bursts.
    pub fn bursts(&self) -> &[ParticleBurst] {
        &self.bursts
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Fill the field with `count` orbs at uniform positions in
    /// `[-FIELD_HALF_EXTENT, FIELD_HALF_EXTENT)` per axis.
    pub fn populate(&mut self, count: usize) {
        for _ in 0..count {
            let position = Vec3::new(
                self.rng.range_f32(-FIELD_HALF_EXTENT, FIELD_HALF_EXTENT),
                self.rng.range_f32(-FIELD_HALF_EXTENT, FIELD_HALF_EXTENT),
                self.rng.range_f32(-FIELD_HALF_EXTENT, FIELD_HALF_EXTENT),
            );
            self.spawn_orb(position);
        }
    }

    /// Spawn one orb at the given position. Base and emissive hues are drawn
    /// independently; phase is the running spawn index. Returns its id.
    pub fn spawn_orb(&mut self, position: Vec3) -> OrbId {
        let id = OrbId::from_u64_pair(self.rng.next_u64(), self.rng.next_u64());
        let orb = Orb {
            position,
            rotation: Vec3::ZERO,
            color: Rgb::from_hsl(self.rng.next_f32() * 360.0, 0.70, 0.50),
            emissive: Rgb::from_hsl(self.rng.next_f32() * 360.0, 0.50, 0.30),
            phase: self.spawned_total as f32,
        };
        self.spawned_total += 1;
        self.orbs.insert(id, orb);
        self.event_log.push(SceneEvent::OrbSpawned { id });
        id
    }

    /// Explode an orb: remove it from the registry and replace it with a
    /// burst of `PARTICLES_PER_BURST` static particles at its last position,
    /// inheriting its current color (the highlight color if it was hovered).
    /// The burst expires `BURST_LIFETIME` after `now`. Returns the particle
    /// count.
    pub fn explode_orb(&mut self, id: OrbId, now: Duration) -> Result<usize, SceneError> {
        let orb = self.orbs.remove(&id).ok_or(SceneError::OrbNotFound(id))?;
        let mut particles = Vec::with_capacity(PARTICLES_PER_BURST);
        for _ in 0..PARTICLES_PER_BURST {
            let velocity = Vec3::new(
                self.rng.range_f32(-1.0, 1.0),
                self.rng.range_f32(-1.0, 1.0),
                self.rng.range_f32(-1.0, 1.0),
            );
            particles.push(Particle {
                position: orb.position,
                velocity,
                color: orb.color,
            });
        }
        let count = particles.len();
        self.bursts.push(ParticleBurst {
            particles,
            expires_at: now + BURST_LIFETIME,
        });
        self.event_log.push(SceneEvent::OrbExploded { id, particles: count });
        tracing::debug!(?id, particles = count, "orb exploded");
        Ok(count)
    }

    /// Remove every burst whose deadline has passed. Returns the number of
    /// particles removed.
    pub fn sweep_expired(&mut self, now: Duration) -> usize {
        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bursts)
            .into_iter()
            .partition(|b| b.expires_at <= now);
        self.bursts = live;
        let mut removed = 0;
        for burst in expired {
            removed += burst.particles.len();
            self.event_log.push(SceneEvent::BurstExpired {
                particles: burst.particles.len(),
            });
        }
        if removed > 0 {
            tracing::debug!(particles = removed, "swept expired bursts");
        }
        removed
    }

    /// Advance the animation by one frame at scene time `elapsed`.
    ///
    /// Every orb gains a fresh random spin increment in
    /// `[SPIN_MIN, SPIN_MIN + SPIN_JITTER)` on each of x and y, re-drawn per
    /// frame per axis, and bobs by `sin(t * FLOAT_RATE + phase)` scaled to
    /// `FLOAT_AMPLITUDE`.
    pub fn advance(&mut self, elapsed: Duration) {
        let _span = tracing::info_span!("scene_advance").entered();
        self.frame += 1;
        let t = elapsed.as_secs_f32();
        for orb in self.orbs.values_mut() {
            orb.rotation.x += SPIN_MIN + self.rng.next_f32() * SPIN_JITTER;
            orb.rotation.y += SPIN_MIN + self.rng.next_f32() * SPIN_JITTER;
            orb.position.y += (t * FLOAT_RATE + orb.phase).sin() * FLOAT_AMPLITUDE;
        }
    }

    /// Shift every orb vertically by `sin(offset * SCROLL_BOB_RATE)` scaled
    /// to `SCROLL_BOB_AMPLITUDE`. Called once per scroll event with the
    /// accumulated offset; the shift is additive, so repeated events at the
    /// same offset keep drifting the field. That drift is intentional.
    pub fn apply_scroll(&mut self, offset: f32) {
        let bob = (offset * SCROLL_BOB_RATE).sin() * SCROLL_BOB_AMPLITUDE;
        for orb in self.orbs.values_mut() {
            orb.position.y += bob;
        }
    }

    /// Paint an orb with the hover highlight. The highlight sticks; no
    /// operation restores the original color. Returns false for stale ids.
    pub fn highlight_orb(&mut self, id: OrbId) -> bool {
        if let Some(orb) = self.orbs.get_mut(&id) {
            orb.color = HIGHLIGHT_COLOR;
            true
        } else {
            false
        }
    }

    /// Compute a deterministic hash of the scene state for comparison.
    /// Uses canonical (BTreeMap) iteration order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.frame.to_le_bytes());
        mix(&mut h, &self.spawned_total.to_le_bytes());
        for (id, orb) in &self.orbs {
            mix(&mut h, id.0.as_bytes());
            mix(&mut h, &orb.position.x.to_le_bytes());
            mix(&mut h, &orb.position.y.to_le_bytes());
            mix(&mut h, &orb.position.z.to_le_bytes());
            mix(&mut h, &orb.rotation.x.to_le_bytes());
            mix(&mut h, &orb.rotation.y.to_le_bytes());
            mix(&mut h, &orb.rotation.z.to_le_bytes());
            mix(&mut h, &orb.color.r.to_le_bytes());
            mix(&mut h, &orb.color.g.to_le_bytes());
            mix(&mut h, &orb.color.b.to_le_bytes());
            mix(&mut h, &orb.emissive.r.to_le_bytes());
            mix(&mut h, &orb.emissive.g.to_le_bytes());
            mix(&mut h, &orb.emissive.b.to_le_bytes());
            mix(&mut h, &orb.phase.to_le_bytes());
        }
        for burst in &self.bursts {
            mix(&mut h, &burst.expires_at.as_nanos().to_le_bytes());
            for p in &burst.particles {
                mix(&mut h, &p.position.x.to_le_bytes());
                mix(&mut h, &p.position.y.to_le_bytes());
                mix(&mut h, &p.position.z.to_le_bytes());
                mix(&mut h, &p.velocity.x.to_le_bytes());
                mix(&mut h, &p.velocity.y.to_le_bytes());
                mix(&mut h, &p.velocity.z.to_le_bytes());
            }
        }
        h
    }
}
