//! Host play session
//!
//! Wraps an `Engine` with the host's frame-loop lifecycle. Any failure while
//! starting or running a frame ends the session for good: the loop stops,
//! input listeners are detached and the engine is released. Starting over
//! means building a new session.

use super::HostError;
use crate::engine::Engine;
use crate::renderer::Surface;

/// Shown when the engine could not be created
pub const INIT_FAILURE_MESSAGE: &str = "Failed to load game engine.";
/// Shown when a frame failed mid-game
pub const GAMEPLAY_FAILURE_MESSAGE: &str = "Game error occurred during gameplay";

/// Lifecycle of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Stopped by the host (teardown), not an error
    Stopped,
    /// Ended by a failure; `message` is user-facing
    Aborted { message: String },
}

/// Whether the host should forward a key to the engine (and suppress the
/// browser default for it)
pub fn forwards_key(key: &str) -> bool {
    key == " " || key.starts_with("Arrow")
}

/// One play session over an engine instance
pub struct Session<E: Engine> {
    engine: Option<E>,
    state: SessionState,
    teardown: Vec<Box<dyn FnOnce()>>,
    frames: u64,
}

impl<E: Engine> Session<E> {
    /// Start a session with an engine that is already built
    pub fn new(engine: E) -> Self {
        Self {
            engine: Some(engine),
            state: SessionState::Running,
            teardown: Vec::new(),
            frames: 0,
        }
    }

    /// Build the engine and start; a failed build yields an aborted session
    pub fn launch(init: impl FnOnce() -> Result<E, HostError>) -> Self {
        match init() {
            Ok(engine) => {
                log::info!("Session started");
                Self::new(engine)
            }
            Err(e) => {
                log::error!("Failed to initialize game: {}", e);
                Self {
                    engine: None,
                    state: SessionState::Aborted {
                        message: INIT_FAILURE_MESSAGE.to_string(),
                    },
                    teardown: Vec::new(),
                    frames: 0,
                }
            }
        }
    }

    /// Register cleanup to run when the session ends (e.g. detaching
    /// listeners). Runs immediately if the session already ended.
    pub fn on_teardown(&mut self, f: impl FnOnce() + 'static) {
        if self.is_running() {
            self.teardown.push(Box::new(f));
        } else {
            f();
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// User-facing failure message, if the session aborted
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Aborted { message } => Some(message),
            _ => None,
        }
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Forward a key press. Returns true if the key belongs to the game and
    /// the host should prevent its default action.
    pub fn key_down(&mut self, key: &str) -> bool {
        let forwarded = forwards_key(key);
        if let (true, Some(engine)) = (forwarded, self.engine.as_mut()) {
            engine.key_down(key);
        }
        forwarded
    }

    /// Forward a key release; see `key_down`
    pub fn key_up(&mut self, key: &str) -> bool {
        let forwarded = forwards_key(key);
        if let (true, Some(engine)) = (forwarded, self.engine.as_mut()) {
            engine.key_up(key);
        }
        forwarded
    }

    /// Run one frame: step, then draw. Returns whether the host should
    /// schedule another frame.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };

        engine.step();
        if let Err(e) = engine.draw(surface) {
            self.fail(HostError::from(e));
            return false;
        }

        self.frames += 1;
        true
    }

    /// End the session because of a host-side failure
    pub fn fail(&mut self, error: HostError) {
        log::error!("Game loop error: {}", error);
        self.end(SessionState::Aborted {
            message: GAMEPLAY_FAILURE_MESSAGE.to_string(),
        });
    }

    /// Normal teardown (page unload, component unmount)
    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("Session stopped after {} frames", self.frames);
            self.end(SessionState::Stopped);
        }
    }

    fn end(&mut self, state: SessionState) {
        if !self.is_running() {
            return;
        }
        self.engine = None;
        self.state = state;
        for detach in self.teardown.drain(..) {
            detach();
        }
    }
}
