//! Metroidvania - A 2D platformer engine for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, patrol, timers)
//! - `renderer`: Draw command projection and drawing surfaces
//! - `engine`: The host-facing engine contract and its implementation
//! - `platform`: Host session and browser glue
//! - `settings`: Data-driven tuning

pub mod engine;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{Engine, GameEngine};
pub use settings::{ConfigError, Settings};
pub use sim::Rect;

/// Stage and level constants
pub mod consts {
    /// Stage dimensions (pixels)
    pub const STAGE_WIDTH: f32 = 800.0;
    pub const STAGE_HEIGHT: f32 = 600.0;

    /// Player spawn point and size (constant for the session)
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 420.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Height of the pulsing strip drawn above the goal platform
    pub const GOAL_STRIP_HEIGHT: f32 = 6.0;
}
