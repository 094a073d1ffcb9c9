//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per displayed frame, no wall-clock time
//! - Seeded RNG only (background stars)
//! - Stable iteration order (level order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod input;
pub mod level;
pub mod state;
pub mod tick;

pub use geometry::{Axis, AxisContact, Body, Rect, overlaps, resolve_axis};
pub use input::{InputState, Key};
pub use state::{Enemy, GameState, Platform, Player, Star};
pub use tick::step;
