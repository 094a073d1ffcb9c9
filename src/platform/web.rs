//! Browser bindings (WASM only)
//!
//! `GameWrapper` is the JS-visible engine handle: a page can construct it,
//! forward key events, and call `update`/`render` from its own
//! `requestAnimationFrame` loop.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::HostError;
use crate::engine::{Engine, GameEngine};
use crate::renderer::CanvasSurface;
use crate::settings::Settings;

/// Install the panic hook and console logger (idempotent)
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Per-page-load seed for the star field
pub fn session_seed() -> u64 {
    js_sys::Date::now() as u64
}

pub fn document() -> Result<Document, HostError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(HostError::NoWindow)
}

/// Look up a canvas by element id and get its 2D context
pub fn canvas_context(
    document: &Document,
    id: &str,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), HostError> {
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| HostError::NoCanvas(id.to_string()))?;

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(HostError::NoContext)?;

    Ok((canvas, ctx))
}

/// JS-facing engine handle
#[wasm_bindgen]
pub struct GameWrapper {
    engine: GameEngine,
}

#[wasm_bindgen]
impl GameWrapper {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GameWrapper {
        init_logging();
        let settings = Settings::load().with_seed(session_seed());
        GameWrapper {
            engine: GameEngine::new(settings),
        }
    }

    pub fn update(&mut self) {
        self.engine.step();
    }

    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let mut surface = CanvasSurface::new(ctx);
        self.engine
            .draw(&mut surface)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn handle_key_down(&mut self, key: &str) {
        self.engine.key_down(key);
    }

    pub fn handle_key_up(&mut self, key: &str) {
        self.engine.key_up(key);
    }

    /// `[x, y]` of the player's top-left corner
    pub fn player_position(&self) -> Vec<f32> {
        self.engine.player_position().to_array().to_vec()
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for GameWrapper {
    fn default() -> Self {
        Self::new()
    }
}
