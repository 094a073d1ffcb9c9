//! Axis-aligned rectangle geometry and per-axis collision resolution
//!
//! Motion is resolved one axis at a time: move along x and push out of every
//! overlapping solid, then do the same for y. Resolving a single axis at a
//! time removes the corner ambiguity of simultaneous two-axis overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in stage coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its top-left corner and a size vector
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// True iff `a` and `b` overlap with positive area
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Collision axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A moving box being resolved against static solids
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Body {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// What happened while resolving one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisContact {
    /// Landed on top of a solid (falling on the y axis)
    pub landed: bool,
    /// Hit the underside of a solid (rising on the y axis)
    pub bumped_head: bool,
    /// Pushed out sideways on the x axis
    pub hit_wall: bool,
}

/// Resolve `body` against `solids` along one axis.
///
/// Solids are visited in order. For each one overlapping the body, the body
/// is snapped to the edge it approached from (chosen by the sign of its
/// velocity on that axis) and that velocity component is zeroed. With zero
/// velocity on the axis nothing is pushed, only the component is cleared.
pub fn resolve_axis<'a>(
    body: &mut Body,
    solids: impl IntoIterator<Item = &'a Rect>,
    axis: Axis,
) -> AxisContact {
    let mut contact = AxisContact::default();

    for solid in solids {
        if !overlaps(&body.rect(), solid) {
            continue;
        }

        match axis {
            Axis::X => {
                if body.vel.x > 0.0 {
                    body.pos.x = solid.x - body.size.x;
                    contact.hit_wall = true;
                } else if body.vel.x < 0.0 {
                    body.pos.x = solid.right();
                    contact.hit_wall = true;
                }
                body.vel.x = 0.0;
            }
            Axis::Y => {
                if body.vel.y > 0.0 {
                    body.pos.y = solid.y - body.size.y;
                    body.vel.y = 0.0;
                    contact.landed = true;
                } else if body.vel.y < 0.0 {
                    body.pos.y = solid.bottom();
                    body.vel.y = 0.0;
                    contact.bumped_head = true;
                }
            }
        }
    }

    contact
}
