//! Static level layout
//!
//! Platforms are listed bottom-up; the last one is the goal.

use super::geometry::Rect;

/// Fixed platform geometry. The last entry is the goal platform.
pub const PLATFORMS: [Rect; 8] = [
    Rect::new(0.0, 560.0, 800.0, 40.0), // ground
    Rect::new(60.0, 470.0, 180.0, 18.0),
    Rect::new(320.0, 500.0, 140.0, 18.0),
    Rect::new(520.0, 440.0, 160.0, 18.0),
    Rect::new(220.0, 380.0, 180.0, 18.0),
    Rect::new(40.0, 320.0, 140.0, 18.0),
    Rect::new(420.0, 300.0, 160.0, 18.0),
    Rect::new(640.0, 360.0, 120.0, 18.0), // goal
];

/// Spawn description for a patrolling enemy
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub bounds: Rect,
    pub range: f32,
    pub speed: f32,
    pub direction: f32,
}

/// Fixed enemy roster. Each enemy patrols around its spawn x.
pub const ENEMIES: [EnemySpawn; 3] = [
    EnemySpawn {
        bounds: Rect::new(380.0, 520.0, 38.0, 38.0),
        range: 80.0,
        speed: 1.2,
        direction: 1.0,
    },
    EnemySpawn {
        bounds: Rect::new(540.0, 410.0, 32.0, 32.0),
        range: 60.0,
        speed: 1.6,
        direction: -1.0,
    },
    EnemySpawn {
        bounds: Rect::new(220.0, 350.0, 32.0, 32.0),
        range: 90.0,
        speed: 1.1,
        direction: 1.0,
    },
];
