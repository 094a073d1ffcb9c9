//! Engine tuning and configuration
//!
//! Defaults match the shipped level feel. A host may supply a JSON
//! override; on the web it is read (never written) from LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Default seed for background star placement
pub const DEFAULT_SEED: u64 = 0x5EED_57A2;

/// Upper bound on `star_count`
pub const MAX_STAR_COUNT: usize = 10_000;

/// Engine settings (physics tuning, cosmetics, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics (per tick) ===
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Horizontal speed while a direction key is held
    pub move_speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_strength: f32,
    /// Multiplier applied to vx when no direction key is held
    pub friction: f32,
    /// |vx| below this snaps to zero
    pub velocity_epsilon: f32,

    // === Damage ===
    /// Ticks the hurt flicker lasts after enemy contact
    pub hurt_duration: u32,
    /// Horizontal knockback magnitude (signed by enemy direction)
    pub knockback_x: f32,
    /// Vertical knockback velocity (negative = up)
    pub knockback_y: f32,

    // === Background ===
    /// Number of parallax stars
    pub star_count: usize,
    /// Max extra distance past the right edge when a star respawns
    pub star_respawn_jitter: f32,
    /// Seed for the star RNG
    pub seed: u64,

    // === HUD ===
    pub hud_lines: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: 0.75,
            move_speed: 4.0,
            jump_strength: -14.0,
            friction: 0.8,
            velocity_epsilon: 0.01,

            hurt_duration: 20,
            knockback_x: 6.0,
            knockback_y: -6.0,

            star_count: 40,
            star_respawn_jitter: 40.0,
            seed: DEFAULT_SEED,

            hud_lines: vec![
                "Rust engine active".to_string(),
                "Reach the glowing platform!".to_string(),
            ],
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Same settings with a different star seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("move_speed", self.move_speed),
            ("jump_strength", self.jump_strength),
            ("friction", self.friction),
            ("velocity_epsilon", self.velocity_epsilon),
            ("knockback_x", self.knockback_x),
            ("knockback_y", self.knockback_y),
            ("star_respawn_jitter", self.star_respawn_jitter),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid {
                field,
                reason: "must be finite",
            });
        }

        if self.gravity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "gravity",
                reason: "must not be negative",
            });
        }
        if self.move_speed <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "move_speed",
                reason: "must be positive",
            });
        }
        if self.jump_strength >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump_strength",
                reason: "must be negative (upward)",
            });
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::Invalid {
                field: "friction",
                reason: "must be within 0..=1",
            });
        }
        if self.velocity_epsilon < 0.0 || self.star_respawn_jitter < 0.0 {
            return Err(ConfigError::Invalid {
                field: if self.velocity_epsilon < 0.0 {
                    "velocity_epsilon"
                } else {
                    "star_respawn_jitter"
                },
                reason: "must not be negative",
            });
        }
        if self.star_count > MAX_STAR_COUNT {
            return Err(ConfigError::Invalid {
                field: "star_count",
                reason: "must be at most 10000",
            });
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "metroidvania_settings";

    /// Load settings override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
