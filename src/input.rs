//! Held-key tracking
//!
//! The browser reports key presses as events; the simulation wants a
//! snapshot of what is held when a tick runs.

use crate::sim::TickInput;

/// Game-relevant keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            " " | "Spacebar" => Some(Key::Fire),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Key::Left => 1 << 0,
            Key::Right => 1 << 1,
            Key::Up => 1 << 2,
            Key::Down => 1 << 3,
            Key::Fire => 1 << 4,
        }
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Release everything (window lost focus, keyup events will not arrive)
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Snapshot for one tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.contains(Key::Left),
            right: self.contains(Key::Right),
            up: self.contains(Key::Up),
            down: self.contains(Key::Down),
            fire: self.contains(Key::Fire),
        }
    }
}
