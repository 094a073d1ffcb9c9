//! Per-tick simulation step
//!
//! One call advances the world exactly one displayed frame. The phases run
//! in a fixed order and each one sees the results of the one before it.

use super::geometry::{Axis, resolve_axis};
use super::input::InputState;
use super::state::{GameState, Platform, Player};
use crate::consts::*;
use crate::settings::Settings;

/// Advance the game state by one tick
pub fn step(state: &mut GameState, settings: &Settings) {
    state.tick = state.tick.wrapping_add(1);

    // Parallax background
    for star in &mut state.stars {
        star.drift(&mut state.rng, settings.star_respawn_jitter);
    }

    // Player motion
    let input = state.input;
    apply_horizontal_input(&mut state.player, &input, settings);
    if apply_jump(&mut state.player, &input, &mut state.jump_armed, settings) {
        log::debug!("jump at tick {} from y={}", state.tick, state.player.pos.y);
    }
    apply_gravity(&mut state.player, settings);
    move_and_collide(&mut state.player, &state.platforms);

    // Enemy patrol
    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        if enemy.patrol() {
            log::trace!("enemy {} turned at x={}", i, enemy.pos.x);
        }
    }

    state.hurt_timer = state.hurt_timer.saturating_sub(1);

    apply_enemy_contacts(state, settings);
}

/// Set vx from the latched direction keys, or decay it by friction.
///
/// Left wins when both directions are held.
pub fn apply_horizontal_input(player: &mut Player, input: &InputState, settings: &Settings) {
    if input.left {
        player.vel.x = -settings.move_speed;
    } else if input.right {
        player.vel.x = settings.move_speed;
    } else {
        player.vel.x *= settings.friction;
        if player.vel.x.abs() < settings.velocity_epsilon {
            player.vel.x = 0.0;
        }
    }
}

/// Start a jump if jump is held, the player stands on something and the
/// key has been released since the last jump. Returns true when a jump
/// started.
pub fn apply_jump(
    player: &mut Player,
    input: &InputState,
    jump_armed: &mut bool,
    settings: &Settings,
) -> bool {
    if !input.jump {
        *jump_armed = true;
        return false;
    }
    if *jump_armed && player.grounded {
        player.vel.y = settings.jump_strength;
        player.grounded = false;
        *jump_armed = false;
        return true;
    }
    false
}

/// Unconditional gravity (no terminal velocity)
#[inline]
pub fn apply_gravity(player: &mut Player, settings: &Settings) {
    player.vel.y += settings.gravity;
}

/// Move along x and resolve, then along y and resolve, clamping to the
/// stage after each pass. The x pass is complete before y begins.
pub fn move_and_collide(player: &mut Player, platforms: &[Platform]) {
    let solids = || platforms.iter().map(|p| &p.rect);

    let mut body = player.body();
    body.pos.x += body.vel.x;
    resolve_axis(&mut body, solids(), Axis::X);
    player.apply_body(body);
    clamp_horizontal(player);

    let mut body = player.body();
    body.pos.y += body.vel.y;
    let contact = resolve_axis(&mut body, solids(), Axis::Y);
    player.apply_body(body);
    // Only this tick's contact grounds the player
    player.grounded = contact.landed;
    clamp_vertical(player);
}

fn clamp_horizontal(player: &mut Player) {
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    } else if player.pos.x + player.size.x > STAGE_WIDTH {
        player.pos.x = STAGE_WIDTH - player.size.x;
        player.vel.x = 0.0;
    }
}

fn clamp_vertical(player: &mut Player) {
    if player.pos.y + player.size.y > STAGE_HEIGHT {
        player.pos.y = STAGE_HEIGHT - player.size.y;
        player.vel.y = 0.0;
        player.grounded = true;
    } else if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel.y = player.vel.y.max(0.0);
    }
}

/// Every enemy overlapping the player restarts the hurt timer and knocks
/// the player back along the enemy's patrol direction. Overlaps on later
/// ticks apply again; there is no invulnerability window.
pub fn apply_enemy_contacts(state: &mut GameState, settings: &Settings) {
    let player_rect = state.player.rect();
    for enemy in &state.enemies {
        if enemy.rect().overlaps(&player_rect) {
            state.hurt_timer = settings.hurt_duration;
            state.player.vel.x = enemy.direction * settings.knockback_x;
            state.player.vel.y = settings.knockback_y;
            log::debug!(
                "player hit at tick {} (enemy at x={}, dir={})",
                state.tick,
                enemy.pos.x,
                enemy.direction
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::input::Key;
    use crate::sim::state::Enemy;
    use glam::Vec2;

    fn new_state() -> (GameState, Settings) {
        let settings = Settings::default().with_seed(12345);
        (GameState::new(&settings), settings)
    }

    /// Tick until the player stops moving vertically on some surface
    fn settle(state: &mut GameState, settings: &Settings) {
        for _ in 0..120 {
            step(state, settings);
            if state.player.grounded && state.player.vel.y == 0.0 {
                return;
            }
        }
        panic!("player never settled");
    }

    #[test]
    fn test_spawn_lands_on_ledge() {
        let (mut state, settings) = new_state();
        settle(&mut state, &settings);
        // Spawn column sits over the ledge at y=470
        assert_eq!(state.player.pos.y, 470.0 - PLAYER_HEIGHT);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_steady_state_no_drift() {
        let (mut state, settings) = new_state();
        settle(&mut state, &settings);
        let rest = state.player.pos;
        for _ in 0..200 {
            step(&mut state, &settings);
            assert_eq!(state.player.pos, rest);
            assert_eq!(state.player.vel, Vec2::ZERO);
            assert!(state.player.grounded);
        }
    }

    #[test]
    fn test_jump_from_ground() {
        let (mut state, settings) = new_state();
        // Stand on the ground floor
        state.player.pos = Vec2::new(280.0, 560.0 - PLAYER_HEIGHT);
        state.player.vel = Vec2::ZERO;
        state.player.grounded = true;
        state.input.press(Key::Jump);

        // The jump phase itself sets exactly the jump strength
        let mut player = state.player;
        let mut armed = true;
        assert!(apply_jump(&mut player, &state.input, &mut armed, &settings));
        assert_eq!(player.vel.y, -14.0);
        assert!(!player.grounded);
        assert!(!armed);

        // Over a full step gravity is integrated after the jump
        step(&mut state, &settings);
        assert_eq!(state.player.vel.y, -14.0 + 0.75);
        assert!(!state.player.grounded);
        assert!(state.player.pos.y < 500.0);
    }

    #[test]
    fn test_no_double_jump() {
        let (mut state, settings) = new_state();
        state.player.pos = Vec2::new(280.0, 500.0);
        state.player.grounded = true;
        state.input.press(Key::Jump);
        step(&mut state, &settings);
        let vy_after_jump = state.player.vel.y;

        // Still holding jump while airborne only integrates gravity
        step(&mut state, &settings);
        assert_eq!(state.player.vel.y, vy_after_jump + 0.75);
    }

    #[test]
    fn test_held_jump_needs_release() {
        let (mut state, settings) = new_state();
        state.enemies.clear();
        settle(&mut state, &settings);

        let jump_vy = settings.jump_strength + settings.gravity;
        state.input.press(Key::Jump);
        let mut jumps = 0;
        for _ in 0..200 {
            step(&mut state, &settings);
            if state.player.vel.y == jump_vy {
                jumps += 1;
            }
        }
        assert_eq!(jumps, 1);
        assert!(state.player.grounded);
        assert!(!state.jump_armed);

        // One tick with the key up re-arms it
        state.input.release(Key::Jump);
        step(&mut state, &settings);
        assert!(state.jump_armed);
        state.input.press(Key::Jump);
        step(&mut state, &settings);
        assert_eq!(state.player.vel.y, jump_vy);
    }

    #[test]
    fn test_released_in_air_jumps_only_after_landing() {
        let (mut state, settings) = new_state();
        state.enemies.clear();
        settle(&mut state, &settings);

        state.input.press(Key::Jump);
        step(&mut state, &settings);
        state.input.release(Key::Jump);
        step(&mut state, &settings);
        assert!(state.jump_armed);
        assert!(!state.player.grounded);

        // Re-pressed mid-air: nothing until ground contact
        let jump_vy = settings.jump_strength + settings.gravity;
        state.input.press(Key::Jump);
        let mut ticks = 0;
        while !state.player.grounded {
            step(&mut state, &settings);
            assert_ne!(state.player.vel.y, jump_vy);
            ticks += 1;
            assert!(ticks < 200, "player never landed");
        }
        step(&mut state, &settings);
        assert_eq!(state.player.vel.y, jump_vy);
    }

    #[test]
    fn test_horizontal_input_priority_and_friction() {
        let settings = Settings::default();
        let mut player = Player::default();

        let both = InputState {
            left: true,
            right: true,
            jump: false,
        };
        apply_horizontal_input(&mut player, &both, &settings);
        assert_eq!(player.vel.x, -4.0);

        let right = InputState {
            right: true,
            ..Default::default()
        };
        apply_horizontal_input(&mut player, &right, &settings);
        assert_eq!(player.vel.x, 4.0);

        let none = InputState::default();
        apply_horizontal_input(&mut player, &none, &settings);
        assert!((player.vel.x - 3.2).abs() < 1e-6);

        for _ in 0..100 {
            apply_horizontal_input(&mut player, &none, &settings);
        }
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_wall_collision_moving_right() {
        let platforms = [Platform {
            rect: Rect::new(320.0, 500.0, 140.0, 18.0),
        }];
        let mut player = Player {
            pos: Vec2::new(281.0, 470.0),
            vel: Vec2::new(4.0, 0.0),
            ..Default::default()
        };

        move_and_collide(&mut player, &platforms);

        assert_eq!(player.pos.x + player.size.x, 320.0);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_head_bump_under_platform() {
        let platforms = [Platform {
            rect: Rect::new(0.0, 100.0, 200.0, 18.0),
        }];
        let mut player = Player {
            pos: Vec2::new(50.0, 120.0),
            vel: Vec2::new(0.0, -5.0),
            ..Default::default()
        };

        move_and_collide(&mut player, &platforms);

        assert_eq!(player.pos.y, 118.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.grounded);
    }

    #[test]
    fn test_walking_off_ledge_clears_grounded() {
        let (mut state, settings) = new_state();
        settle(&mut state, &settings);
        state.input.press(Key::Left);
        // Ledge spans x 60..240; walk left until past its edge
        let mut airborne = false;
        for _ in 0..40 {
            step(&mut state, &settings);
            if !state.player.grounded {
                airborne = true;
                break;
            }
        }
        assert!(airborne);
    }

    #[test]
    fn test_stage_bounds_clamp() {
        let mut player = Player {
            pos: Vec2::new(2.0, 10.0),
            vel: Vec2::new(-10.0, 0.0),
            ..Default::default()
        };
        move_and_collide(&mut player, &[]);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.vel.x, 0.0);

        let mut player = Player {
            pos: Vec2::new(755.0, 10.0),
            vel: Vec2::new(10.0, 0.0),
            ..Default::default()
        };
        move_and_collide(&mut player, &[]);
        assert_eq!(player.pos.x, STAGE_WIDTH - PLAYER_WIDTH);

        let mut player = Player {
            pos: Vec2::new(100.0, 535.0),
            vel: Vec2::new(0.0, 10.0),
            ..Default::default()
        };
        move_and_collide(&mut player, &[]);
        assert_eq!(player.pos.y + player.size.y, STAGE_HEIGHT);
        assert!(player.grounded);
    }

    #[test]
    fn test_enemy_contact_sets_hurt_and_knockback() {
        let (mut state, settings) = new_state();
        let enemy = state.enemies[0];
        state.player.pos = enemy.pos - Vec2::new(10.0, 10.0);
        state.player.vel = Vec2::ZERO;

        apply_enemy_contacts(&mut state, &settings);

        assert_eq!(state.hurt_timer, 20);
        assert_eq!(state.player.vel.x, enemy.direction * 6.0);
        assert_eq!(state.player.vel.y, -6.0);
    }

    /// Stationary enemy on the open ground right of the raised platforms
    fn parked_enemy(x: f32, direction: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, 520.0),
            size: Vec2::new(38.0, 38.0),
            origin_x: x,
            range: 80.0,
            speed: 0.0,
            direction,
        }
    }

    #[test]
    fn test_contact_reapplies_every_overlapping_tick() {
        let (mut state, settings) = new_state();
        state.enemies = vec![parked_enemy(690.0, 1.0)];
        state.player.pos = Vec2::new(700.0, 500.0);
        state.player.vel = Vec2::ZERO;

        for _ in 0..5 {
            step(&mut state, &settings);
            assert!(state.player.rect().overlaps(&state.enemies[0].rect()));
            assert_eq!(state.hurt_timer, 20);
            assert_eq!(state.player.vel, Vec2::new(6.0, -6.0));
        }

        // Knockback eventually carries the player clear
        for _ in 0..5 {
            step(&mut state, &settings);
        }
        assert!(!state.player.rect().overlaps(&state.enemies[0].rect()));
        assert!(state.hurt_timer < 20);
    }

    #[test]
    fn test_contact_from_two_enemies_same_tick() {
        let (mut state, settings) = new_state();
        state.enemies = vec![parked_enemy(690.0, 1.0), parked_enemy(705.0, -1.0)];
        state.player.pos = Vec2::new(700.0, 500.0);
        state.player.vel = Vec2::ZERO;

        step(&mut state, &settings);

        // Both overlap; the later enemy in roster order applies last
        let p = state.player.rect();
        assert!(state.enemies.iter().all(|e| e.rect().overlaps(&p)));
        assert_eq!(state.hurt_timer, 20);
        assert_eq!(state.player.vel, Vec2::new(-6.0, -6.0));

        state.enemies.reverse();
        state.player.pos = Vec2::new(700.0, 500.0);
        state.player.vel = Vec2::ZERO;
        step(&mut state, &settings);
        assert_eq!(state.hurt_timer, 20);
        assert_eq!(state.player.vel, Vec2::new(6.0, -6.0));
    }

    #[test]
    fn test_hurt_timer_expires() {
        let (mut state, settings) = new_state();
        settle(&mut state, &settings);
        state.hurt_timer = settings.hurt_duration;
        for _ in 0..20 {
            assert!(state.is_hurt());
            step(&mut state, &settings);
        }
        assert_eq!(state.hurt_timer, 0);
        step(&mut state, &settings);
        assert_eq!(state.hurt_timer, 0);
    }

    #[test]
    fn test_tick_counter_wraps() {
        let (mut state, settings) = new_state();
        state.tick = u64::MAX;
        step(&mut state, &settings);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let (mut state1, settings) = new_state();
        let (mut state2, _) = new_state();

        let script: [(u32, &str, bool); 6] = [
            (5, "ArrowRight", true),
            (30, " ", true),
            (32, " ", false),
            (60, "ArrowRight", false),
            (70, "ArrowLeft", true),
            (140, "ArrowLeft", false),
        ];

        for t in 0..600u32 {
            for &(at, key, down) in &script {
                if at == t {
                    for s in [&mut state1, &mut state2] {
                        if down {
                            s.input.key_down(key);
                        } else {
                            s.input.key_up(key);
                        }
                    }
                }
            }
            step(&mut state1, &settings);
            step(&mut state2, &settings);
            assert_eq!(state1.player, state2.player);
        }

        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.stars, state2.stars);
        assert_eq!(state1.hurt_timer, state2.hurt_timer);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn apply(input: &mut InputState, bits: u8) {
            input.left = bits & 1 != 0;
            input.right = bits & 2 != 0;
            input.jump = bits & 4 != 0;
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn test_invariants_hold_under_random_input(
                seed in any::<u64>(),
                inputs in proptest::collection::vec((0u8..8, 1usize..30), 1..40),
            ) {
                let settings = Settings::default().with_seed(seed);
                let mut state = GameState::new(&settings);

                for (bits, hold) in inputs {
                    apply(&mut state.input, bits);
                    for _ in 0..hold {
                        step(&mut state, &settings);

                        let p = state.player.rect();
                        for platform in &state.platforms {
                            prop_assert!(!p.overlaps(&platform.rect), "player {:?} inside {:?}", p, platform.rect);
                        }
                        prop_assert!(p.x >= 0.0 && p.right() <= STAGE_WIDTH);
                        prop_assert!(p.bottom() <= STAGE_HEIGHT);
                        for enemy in &state.enemies {
                            prop_assert!((enemy.pos.x - enemy.origin_x).abs() <= enemy.range);
                        }
                    }
                }
            }
        }
    }
}
