//! Shared vocabulary for the orbfield workspace: ids, colors, pointer
//! coordinates, and the seeded RNG every stochastic decision flows through.

pub mod color;
pub mod rng;
pub mod types;

pub use color::Rgb;
pub use rng::SeededRng;
pub use types::{OrbId, PointerNdc};
