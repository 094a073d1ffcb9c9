//! Host-facing engine contract
//!
//! The host forwards key events, calls `step` once per displayed frame and
//! then `draw` against its surface. `GameEngine` owns every piece of entity
//! and timer state; hosts only ever see owned snapshots.

use glam::Vec2;
use serde::Serialize;

use crate::renderer::{DrawCommand, Surface, SurfaceError, execute_all, project};
use crate::settings::Settings;
use crate::sim::{Enemy, GameState, Player, step};

/// The capability a host drives
pub trait Engine {
    /// Latch a control key. Unknown keys are ignored.
    fn key_down(&mut self, key: &str);
    /// Release a control key. Unknown keys are ignored.
    fn key_up(&mut self, key: &str);
    /// Advance the simulation exactly one tick
    fn step(&mut self);
    /// Draw the current state onto `surface`
    fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError>;
}

/// Read-only copy of the gameplay-relevant state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub hurt_timer: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
}

/// The platformer engine
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    settings: Settings,
}

impl GameEngine {
    pub fn new(settings: Settings) -> Self {
        let state = GameState::new(&settings);
        log::info!(
            "Engine created (seed {}, {} platforms, {} enemies, {} stars)",
            state.seed,
            state.platforms.len(),
            state.enemies.len(),
            state.stars.len()
        );
        Self { state, settings }
    }

    /// Default tuning with an explicit star seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings::default().with_seed(seed))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    pub fn player_position(&self) -> Vec2 {
        self.state.player.pos
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.state.tick,
            hurt_timer: self.state.hurt_timer,
            player: self.state.player,
            enemies: self.state.enemies.clone(),
        }
    }

    /// Draw list for the current state
    pub fn frame(&self) -> Vec<DrawCommand> {
        project(&self.state, &self.settings)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Engine for GameEngine {
    fn key_down(&mut self, key: &str) {
        self.state.input.key_down(key);
    }

    fn key_up(&mut self, key: &str) {
        self.state.input.key_up(key);
    }

    fn step(&mut self) {
        step(&mut self.state, &self.settings);
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        execute_all(&self.frame(), surface)
    }
}
