//! Canvas 2D surface (WASM only)

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::commands::{Color, Surface, SurfaceError};
use crate::sim::Rect;

/// `Surface` backed by a browser `CanvasRenderingContext2d`
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface<'_> {
    fn fill_vertical_gradient(&mut self, rect: Rect, top: Color, bottom: Color) {
        let gradient = self.ctx.create_linear_gradient(
            rect.x as f64,
            rect.y as f64,
            rect.x as f64,
            rect.bottom() as f64,
        );
        if gradient.add_color_stop(0.0, &top.to_css()).is_err()
            || gradient.add_color_stop(1.0, &bottom.to_css()).is_err()
        {
            log::warn!("Gradient stop rejected, using flat fill");
            self.fill_rect(rect, top);
            return;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        // arc() only fails on a negative radius
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn fill_text(
        &mut self,
        text: &str,
        position: Vec2,
        font: &str,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(font);
        self.ctx
            .fill_text(text, position.x as f64, position.y as f64)
            .map_err(|e| SurfaceError::Text(format!("{:?}", e)))
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }
}
