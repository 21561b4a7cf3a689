//! Pointer tracking and hot-key decoding.

use glam::Vec2;

pub const KEY_ESCAPE: u32 = 27;
/// Key code of the `1` digit key; `1` through `6` select bodies 0 through 5.
pub const KEY_DIGIT_1: u32 = 49;
pub const HOTKEY_COUNT: u32 = 6;

/// Tracks the primary button and turns cursor moves into drag deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    primary_down: bool,
    position: Option<Vec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_down(&mut self, pos: Vec2) {
        self.primary_down = true;
        self.position = Some(pos);
    }

    pub fn on_up(&mut self, pos: Vec2) {
        self.primary_down = false;
        self.position = Some(pos);
    }

    /// Record a cursor move. Returns the drag delta when the primary button
    /// is held and a previous position is known.
    pub fn on_move(&mut self, pos: Vec2) -> Option<Vec2> {
        let last = self.position.replace(pos);
        match last {
            Some(last) if self.primary_down => Some(pos - last),
            _ => None,
        }
    }

    pub fn is_primary_down(&self) -> bool {
        self.primary_down
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }
}

/// What a released key asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Focus the body at this catalog index.
    Focus(usize),
    /// Return to the full scene.
    ClearFocus,
}

/// Decode a key-up code. Digit keys beyond `body_count` are ignored.
pub fn decode_key(key_code: u32, body_count: usize) -> Option<KeyCommand> {
    if key_code == KEY_ESCAPE {
        return Some(KeyCommand::ClearFocus);
    }
    if (KEY_DIGIT_1..KEY_DIGIT_1 + HOTKEY_COUNT).contains(&key_code) {
        let index = (key_code - KEY_DIGIT_1) as usize;
        if index < body_count {
            return Some(KeyCommand::Focus(index));
        }
    }
    None
}
