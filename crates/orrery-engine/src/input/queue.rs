/// Input event types the viewer understands.
/// Coordinates are in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed at (x, y).
    PointerDown { x: f32, y: f32 },
    /// Primary button released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// Cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// Wheel or trackpad scroll.
    Scroll { dx: f32, dy: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The viewport changed size (pixels).
    Resize { width: f32, height: f32 },
}

/// Events buffered between frames, applied in arrival order.
/// The host pushes as events arrive; the runner drains once per tick,
/// before the scene updates.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Yield every pending event, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.pending.drain(..)
    }

    /// Drop pending events without applying them.
    pub fn discard(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
