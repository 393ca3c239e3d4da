//! Input mapping: raw window events become shared actions.
//!
//! # Invariants
//! - The application consumes actions, never raw window events.
//! - Desktop and headless drivers share the same action vocabulary.

pub mod action;
pub mod pointer;

pub use action::Action;
pub use pointer::{PointerTracker, ScrollTracker, LINE_HEIGHT_PX};
