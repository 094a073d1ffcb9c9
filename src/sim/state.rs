//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here and is owned by one
//! `GameState`. The host never holds references into it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Body, Rect};
use super::input::InputState;
use super::level::{ENEMIES, EnemySpawn, PLATFORMS};
use crate::consts::*;
use crate::settings::Settings;

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Standing on a platform or the stage floor
    pub grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            grounded: false,
        }
    }
}

impl Player {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub(crate) fn body(&self) -> Body {
        Body {
            pos: self.pos,
            size: self.size,
            vel: self.vel,
        }
    }

    pub(crate) fn apply_body(&mut self, body: Body) {
        self.pos = body.pos;
        self.vel = body.vel;
    }
}

/// A static, solid platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

/// A patrolling enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Patrol center (x at spawn)
    pub origin_x: f32,
    /// Max distance from `origin_x`
    pub range: f32,
    /// Pixels per tick
    pub speed: f32,
    /// +1 (right) or -1 (left)
    pub direction: f32,
}

impl Enemy {
    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        Self {
            pos: Vec2::new(spawn.bounds.x, spawn.bounds.y),
            size: Vec2::new(spawn.bounds.width, spawn.bounds.height),
            origin_x: spawn.bounds.x,
            range: spawn.range,
            speed: spawn.speed,
            direction: spawn.direction,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Advance one tick along the patrol path.
    ///
    /// Crossing either bound clamps x onto the bound and points the enemy
    /// back toward its origin, so `|x - origin_x| <= range` always holds.
    /// Returns true when the direction flipped.
    pub fn patrol(&mut self) -> bool {
        self.pos.x += self.speed * self.direction;

        let offset = self.pos.x - self.origin_x;
        if offset.abs() >= self.range {
            let side = offset.signum();
            self.pos.x = self.origin_x + side * self.range;
            let flipped = self.direction != -side;
            self.direction = -side;
            return flipped;
        }
        false
    }
}

/// A parallax background star (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Leftward drift per tick
    pub speed: f32,
}

impl Star {
    /// Random star anywhere on the stage
    pub fn random(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * STAGE_WIDTH,
                rng.random::<f32>() * STAGE_HEIGHT,
            ),
            radius: rng.random::<f32>() * 1.5 + 0.5,
            speed: rng.random::<f32>() * 0.3 + 0.1,
        }
    }

    /// Drift left; wrap past the right edge with a fresh height once
    /// off-screen. Radius and speed are kept.
    pub fn drift(&mut self, rng: &mut Pcg32, jitter: f32) {
        self.pos.x -= self.speed;
        if self.pos.x < 0.0 {
            self.pos.x = STAGE_WIDTH + rng.random::<f32>() * jitter;
            self.pos.y = rng.random::<f32>() * STAGE_HEIGHT;
        }
    }
}

/// Complete simulation state for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the star RNG was created from
    pub seed: u64,
    /// Star RNG (the only source of nondeterminism, hence seeded)
    pub rng: Pcg32,
    /// Tick counter, phases cosmetic animation only
    pub tick: u64,
    /// Hurt flicker countdown (ticks)
    pub hurt_timer: u32,
    /// Latched keys, written only by the host-facing key handlers
    pub input: InputState,
    /// Cleared when a jump starts, re-armed once jump is seen released
    pub jump_armed: bool,
    pub player: Player,
    /// Static level geometry (last = goal)
    pub platforms: Vec<Platform>,
    /// Fixed enemy roster
    pub enemies: Vec<Enemy>,
    /// Background stars
    pub stars: Vec<Star>,
}

impl GameState {
    /// Create a new session with the built-in level layout
    pub fn new(settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let stars = (0..settings.star_count)
            .map(|_| Star::random(&mut rng))
            .collect();

        Self {
            seed: settings.seed,
            rng,
            tick: 0,
            hurt_timer: 0,
            input: InputState::default(),
            jump_armed: true,
            player: Player::default(),
            platforms: PLATFORMS.iter().map(|&rect| Platform { rect }).collect(),
            enemies: ENEMIES.iter().map(Enemy::from_spawn).collect(),
            stars,
        }
    }

    /// The goal platform (last in level order)
    pub fn goal(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    /// Whether the player is currently hurt (flicker active)
    pub fn is_hurt(&self) -> bool {
        self.hurt_timer > 0
    }
}
