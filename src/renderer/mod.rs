//! Rendering module
//!
//! Turns simulation state into draw commands and replays them on a surface.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use commands::{Color, DrawCommand, RecordingSurface, Surface, SurfaceError, execute_all};
pub use frame::project;
