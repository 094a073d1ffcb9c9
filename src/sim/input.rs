//! Latched keyboard input
//!
//! The host forwards discrete press/release events; the simulation reads the
//! latched state once per tick and never writes it.

/// Logical control keys understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a host key identifier (`KeyboardEvent.key`) to a control key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Jump),
            _ => None,
        }
    }
}

/// Latched state of the three control keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Latch a raw host key; unknown keys are ignored. Returns whether the
    /// key was recognized.
    pub fn key_down(&mut self, code: &str) -> bool {
        Key::from_code(code).map(|k| self.press(k)).is_some()
    }

    /// Release a raw host key; unknown keys are ignored
    pub fn key_up(&mut self, code: &str) -> bool {
        Key::from_code(code).map(|k| self.release(k)).is_some()
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Jump => self.jump,
        }
    }

    fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Jump => self.jump = held,
        }
    }
}
