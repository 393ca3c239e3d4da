use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from hue (degrees), saturation and lightness (both in
    /// `[0, 1]`). Hue wraps, so `360.0` and `-120.0` are valid inputs.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let a = s * l.min(1.0 - l);
        let f = |n: f32| {
            let k = (n + hue / 30.0).rem_euclid(12.0);
            l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
        };
        Self {
            r: f(0.0),
            g: f(8.0),
            b: f(4.0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}
