//! Keyboard input adapter
//!
//! Key events arrive asynchronously; the simulation samples the held intents
//! once per tick.

use crate::sim::TickInput;

/// Logical action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Map a `KeyboardEvent.code` to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::Left),
            "ArrowRight" | "KeyD" => Some(Action::Right),
            "ArrowUp" | "KeyW" | "Space" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Currently held intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardInput {
    held: TickInput,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. Returns true if the key is bound (so the host can
    /// suppress the browser default, e.g. Space scrolling).
    pub fn press(&mut self, code: &str) -> bool {
        self.set(code, true)
    }

    /// Key released
    pub fn release(&mut self, code: &str) -> bool {
        self.set(code, false)
    }

    /// Drop everything held (focus lost, restart)
    pub fn clear(&mut self) {
        self.held = TickInput::default();
    }

    /// Snapshot for this tick
    pub fn sample(&self) -> TickInput {
        self.held
    }

    fn set(&mut self, code: &str, down: bool) -> bool {
        let Some(action) = Action::from_code(code) else {
            return false;
        };
        match action {
            Action::Left => self.held.left = down,
            Action::Right => self.held.right = down,
            Action::Jump => self.held.jump = down,
        }
        true
    }
}
