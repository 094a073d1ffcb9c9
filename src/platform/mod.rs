//! Platform abstraction layer
//!
//! Handles the host side of the engine:
//! - Session lifecycle and fatal-error handling
//! - Key filtering and forwarding
//! - Browser bindings (WASM only)

pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use session::{Session, SessionState, forwards_key};

use thiserror::Error;

use crate::renderer::SurfaceError;
use crate::settings::ConfigError;

/// Failures at the host boundary. All of them end the session.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no browser window")]
    NoWindow,
    #[error("canvas element `{0}` not found")]
    NoCanvas(String),
    #[error("failed to get canvas 2D context")]
    NoContext,
    #[error("failed to attach `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
