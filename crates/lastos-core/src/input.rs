use std::collections::HashSet;

/// Movement directions a player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    /// Map a DOM `KeyboardEvent.key` value to a movement key.
    /// Accepts W/A/S/D in either case and the arrow keys.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(MoveKey::Up),
            "s" | "arrowdown" => Some(MoveKey::Down),
            "a" | "arrowleft" => Some(MoveKey::Left),
            "d" | "arrowright" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Immutable snapshot of the held movement keys, read once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Raw direction with components in {-1, 0, 1}. Screen space: +y is down.
    /// Opposing keys cancel.
    pub fn axis(self) -> (i8, i8) {
        let dx = self.right as i8 - self.left as i8;
        let dy = self.down as i8 - self.up as i8;
        (dx, dy)
    }

    pub fn is_idle(self) -> bool {
        self.axis() == (0, 0)
    }
}

/// Held-key state, updated from key events between ticks.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<MoveKey>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key press. Returns true if the key is a movement key, in
    /// which case the caller should suppress the browser default.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        match MoveKey::from_key(key) {
            Some(k) => {
                self.keys_down.insert(k);
                true
            },
            None => false,
        }
    }

    /// Register a key release.
    pub fn on_key_up(&mut self, key: &str) {
        if let Some(k) = MoveKey::from_key(key) {
            self.keys_down.remove(&k);
        }
    }

    /// Window lost focus: release events will never arrive, so drop every
    /// held key.
    pub fn on_blur(&mut self) {
        self.keys_down.clear();
    }

    pub fn is_down(&self, key: MoveKey) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn snapshot(&self) -> MoveInput {
        MoveInput {
            up: self.is_down(MoveKey::Up),
            down: self.is_down(MoveKey::Down),
            left: self.is_down(MoveKey::Left),
            right: self.is_down(MoveKey::Right),
        }
    }
}
