use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an orb in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrbId(pub Uuid);

impl OrbId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an id from two u64 halves so seeded callers can mint
    /// reproducible ids.
    pub fn from_u64_pair(high: u64, low: u64) -> Self {
        Self(Uuid::from_u64_pair(high, low))
    }
}

impl Default for OrbId {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer position in normalized device coordinates.
///
/// Both components lie in `[-1, 1]` with +y pointing up, matching clip
/// space. `(0, 0)` is the viewport center and the state before any pointer
/// motion has been observed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerNdc {
    pub x: f32,
    pub y: f32,
}

impl PointerNdc {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert a pixel position (origin top-left, +y down) to NDC.
    /// Degenerate viewport dimensions are clamped to 1.
    pub fn from_pixels(px: f64, py: f64, width: u32, height: u32) -> Self {
        let w = width.max(1) as f64;
        let h = height.max(1) as f64;
        Self {
            x: ((px / w) * 2.0 - 1.0) as f32,
            y: (-(py / h) * 2.0 + 1.0) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orb_id_uniqueness() {
        let a = OrbId::new();
        let b = OrbId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn pointer_default_is_center() {
        let p = PointerNdc::default();
        assert_eq!(p, PointerNdc::new(0.0, 0.0));
    }

    #[test]
    fn pixels_map_to_ndc_corners() {
        let top_left = PointerNdc::from_pixels(0.0, 0.0, 800, 600);
        assert_eq!(top_left, PointerNdc::new(-1.0, 1.0));

        let bottom_right = PointerNdc::from_pixels(800.0, 600.0, 800, 600);
        assert_eq!(bottom_right, PointerNdc::new(1.0, -1.0));

        let center = PointerNdc::from_pixels(400.0, 300.0, 800, 600);
        assert_eq!(center, PointerNdc::new(0.0, 0.0));
    }

    #[test]
    fn zero_viewport_does_not_divide_by_zero() {
        let p = PointerNdc::from_pixels(0.5, 0.5, 0, 0);
        assert!(p.x.is_finite());
        assert!(p.y.is_finite());
    }
}
