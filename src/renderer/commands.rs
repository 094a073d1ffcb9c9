//! Draw commands and the drawing surface contract
//!
//! The engine never touches a canvas directly. It produces an ordered list of
//! `DrawCommand`s and replays them against whatever `Surface` the host owns.

use glam::Vec2;
use thiserror::Error;

use crate::sim::Rect;

/// A drawing primitive failed on the host surface
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("failed to draw text: {0}")]
    Text(String),
    #[error("drawing surface unavailable: {0}")]
    Unavailable(String),
}

/// RGBA color (alpha 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string (`#rrggbb` when opaque)
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Palette
pub mod palette {
    use super::Color;

    pub const SKY_TOP: Color = Color::rgb(0x0b, 0x0b, 0x1a);
    pub const SKY_BOTTOM: Color = Color::rgb(0x13, 0x13, 0x36);
    pub const STAR: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const PLATFORM_FILL: Color = Color::rgb(0x1f, 0x40, 0x68);
    pub const PLATFORM_EDGE: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const ENEMY_FILL: Color = Color::rgb(0xff, 0x4f, 0x6d);
    pub const ENEMY_EDGE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const PLAYER: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const HUD_TEXT: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Goal strip color; alpha comes from the pulse
    pub const GOAL_GLOW: Color = Color::rgb(0x00, 0xff, 0xc8);
}

/// One drawing primitive, in stage coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill `rect` with a top-to-bottom linear gradient
    VerticalGradient { rect: Rect, top: Color, bottom: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, line_width: f32 },
    FillText {
        text: String,
        position: Vec2,
        font: String,
        color: Color,
    },
    /// Global opacity for subsequent commands
    SetAlpha(f32),
}

impl DrawCommand {
    /// Replay this command on a surface
    pub fn execute(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        match self {
            DrawCommand::VerticalGradient { rect, top, bottom } => {
                surface.fill_vertical_gradient(*rect, *top, *bottom);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => surface.fill_circle(*center, *radius, *color),
            DrawCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
            DrawCommand::StrokeRect {
                rect,
                color,
                line_width,
            } => surface.stroke_rect(*rect, *color, *line_width),
            DrawCommand::FillText {
                text,
                position,
                font,
                color,
            } => surface.fill_text(text, *position, font, *color)?,
            DrawCommand::SetAlpha(alpha) => surface.set_alpha(*alpha),
        }
        Ok(())
    }
}

/// Replay commands in order, stopping at the first failure
pub fn execute_all(commands: &[DrawCommand], surface: &mut dyn Surface) -> Result<(), SurfaceError> {
    commands.iter().try_for_each(|cmd| cmd.execute(surface))
}

/// Host drawing surface (Canvas 2D or anything with the same primitives)
pub trait Surface {
    fn fill_vertical_gradient(&mut self, rect: Rect, top: Color, bottom: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_text(
        &mut self,
        text: &str,
        position: Vec2,
        font: &str,
        color: Color,
    ) -> Result<(), SurfaceError>;
    fn set_alpha(&mut self, alpha: f32);
}

/// Surface that records every command it is asked to draw
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn fill_vertical_gradient(&mut self, rect: Rect, top: Color, bottom: Color) {
        self.commands
            .push(DrawCommand::VerticalGradient { rect, top, bottom });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        position: Vec2,
        font: &str,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            position,
            font: font.to_string(),
            color,
        });
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetAlpha(alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(palette::SKY_TOP.to_css(), "#0b0b1a");
        assert_eq!(palette::ENEMY_FILL.to_css(), "#ff4f6d");
        assert_eq!(Color::rgba(0, 255, 200, 0.5).to_css(), "rgba(0, 255, 200, 0.5)");
    }

    #[test]
    fn test_replay_matches_input() {
        let commands = vec![
            DrawCommand::SetAlpha(0.4),
            DrawCommand::FillRect {
                rect: Rect::new(1.0, 2.0, 3.0, 4.0),
                color: palette::PLAYER,
            },
            DrawCommand::FillText {
                text: "hi".into(),
                position: Vec2::new(20.0, 30.0),
                font: "16px monospace".into(),
                color: palette::HUD_TEXT,
            },
        ];

        let mut surface = RecordingSurface::new();
        execute_all(&commands, &mut surface).unwrap();
        assert_eq!(surface.commands, commands);
    }
}
