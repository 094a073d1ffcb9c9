//! Frame projection: game state -> ordered draw commands
//!
//! Back to front: sky, stars, platforms, enemies, player, HUD, goal glow.
//! Pure function of state; nothing here affects gameplay.

use glam::Vec2;

use super::commands::{Color, DrawCommand, palette};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Rect};

/// HUD font
pub const HUD_FONT: &str = "16px \"Courier New\", monospace";
/// Baseline of the first HUD line; later lines step down by `HUD_LINE_STEP`
pub const HUD_ORIGIN: Vec2 = Vec2::new(20.0, 30.0);
pub const HUD_LINE_STEP: f32 = 22.0;
/// Player opacity during the dim half of the hurt flicker
pub const FLICKER_ALPHA: f32 = 0.4;

/// True while the player should be drawn dimmed.
///
/// Alternates every 2 ticks for as long as the hurt timer runs.
#[inline]
pub fn flicker_active(state: &GameState) -> bool {
    state.hurt_timer > 0 && state.tick % 4 < 2
}

/// Goal pulse in 0..=1
#[inline]
pub fn goal_pulse(tick: u64) -> f32 {
    (((tick as f64 / 10.0).sin() + 1.0) / 2.0) as f32
}

/// Opacity of the goal strip: 0.4..=0.8 following the pulse
#[inline]
pub fn goal_alpha(tick: u64) -> f32 {
    0.4 + goal_pulse(tick) * 0.4
}

/// Build the draw list for the current state
pub fn project(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(
        state.stars.len() + state.platforms.len() * 2 + state.enemies.len() * 2 + 8,
    );

    out.push(DrawCommand::VerticalGradient {
        rect: Rect::new(0.0, 0.0, STAGE_WIDTH, STAGE_HEIGHT),
        top: palette::SKY_TOP,
        bottom: palette::SKY_BOTTOM,
    });

    for star in &state.stars {
        out.push(DrawCommand::FillCircle {
            center: star.pos,
            radius: star.radius,
            color: palette::STAR,
        });
    }

    for platform in &state.platforms {
        out.push(DrawCommand::FillRect {
            rect: platform.rect,
            color: palette::PLATFORM_FILL,
        });
        out.push(DrawCommand::StrokeRect {
            rect: platform.rect,
            color: palette::PLATFORM_EDGE,
            line_width: 1.0,
        });
    }

    for enemy in &state.enemies {
        out.push(DrawCommand::FillRect {
            rect: enemy.rect(),
            color: palette::ENEMY_FILL,
        });
        out.push(DrawCommand::StrokeRect {
            rect: enemy.rect(),
            color: palette::ENEMY_EDGE,
            line_width: 1.0,
        });
    }

    let dimmed = flicker_active(state);
    if dimmed {
        out.push(DrawCommand::SetAlpha(FLICKER_ALPHA));
    }
    out.push(DrawCommand::FillRect {
        rect: state.player.rect(),
        color: palette::PLAYER,
    });
    if dimmed {
        out.push(DrawCommand::SetAlpha(1.0));
    }

    for (i, line) in settings.hud_lines.iter().enumerate() {
        out.push(DrawCommand::FillText {
            text: line.clone(),
            position: HUD_ORIGIN + Vec2::new(0.0, HUD_LINE_STEP * i as f32),
            font: HUD_FONT.to_string(),
            color: palette::HUD_TEXT,
        });
    }

    if let Some(goal) = state.goal() {
        let glow = palette::GOAL_GLOW;
        out.push(DrawCommand::FillRect {
            rect: Rect::new(
                goal.rect.x,
                goal.rect.y - GOAL_STRIP_HEIGHT,
                goal.rect.width,
                GOAL_STRIP_HEIGHT,
            ),
            color: Color::rgba(glow.r, glow.g, glow.b, goal_alpha(state.tick)),
        });
    }

    out
}
