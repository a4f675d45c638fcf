//! Mouse buttons, cursor and wheel

use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use bitflags::bitflags;
use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

use super::state::KeyState;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

bitflags! {
    /// Keyboard modifiers held during the last mouse button change
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// `f32` stored as bits so cursor updates need no lock
#[derive(Debug, Default)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Tracks mouse buttons plus cursor position, wheel delta and modifiers
#[derive(Debug, Default)]
pub struct MouseManager {
    buttons: EnumMap<MouseButton, KeyState>,
    position: [AtomicF32; 2],
    scroll: [AtomicF32; 2],
    modifiers: AtomicU8,
}

impl MouseManager {
    /// Creates a manager with every button released and the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw button change along with the modifiers held at the time
    pub(crate) fn set_button(&self, button: MouseButton, modifiers: Modifiers, pressed: bool) {
        self.modifiers.store(modifiers.bits(), Ordering::Release);
        self.buttons[button].set(pressed);
    }

    pub(crate) fn set_position(&self, x: f32, y: f32) {
        self.position[0].store(x);
        self.position[1].store(y);
    }

    pub(crate) fn set_scroll(&self, dx: f32, dy: f32) {
        self.scroll[0].store(dx);
        self.scroll[1].store(dy);
    }

    /// Returns a snapshot of a button's state
    pub fn button(&self, button: MouseButton) -> KeyState {
        self.buttons[button].clone()
    }

    /// Cursor position in canvas pixels
    pub fn position(&self) -> [f32; 2] {
        [self.position[0].load(), self.position[1].load()]
    }

    /// Wheel delta received this tick
    pub fn scroll(&self) -> [f32; 2] {
        [self.scroll[0].load(), self.scroll[1].load()]
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_bits_truncate(self.modifiers.load(Ordering::Acquire))
    }

    pub(crate) fn update(&mut self) {
        for state in self.buttons.values() {
            state.commit();
        }
    }
}
