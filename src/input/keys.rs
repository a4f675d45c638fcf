//! Keyboard channels

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

use super::state::KeyState;

/// Physical key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Key {
    // Common keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    CapsLock,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Navigation
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    PrintScreen,
    ScrollLock,
    Pause,

    // Modifiers
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,

    // Punctuation
    Dash,
    Equals,
    Apostrophe,
    Semicolon,
    Comma,
    Period,
    Slash,
    Backslash,
    Grave,
    LeftBracket,
    RightBracket,

    // Numpad
    NumLock,
    NumPad0,
    NumPad1,
    NumPad2,
    NumPad3,
    NumPad4,
    NumPad5,
    NumPad6,
    NumPad7,
    NumPad8,
    NumPad9,
    NumPadDecimal,
    NumPadDivide,
    NumPadMultiply,
    NumPadSubtract,
    NumPadAdd,
    NumPadEnter,

    // Other
    Other,
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for Key {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::Space => Self::Space,
            WK::Enter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Backspace => Self::Backspace,
            WK::Tab => Self::Tab,
            WK::CapsLock => Self::CapsLock,

            WK::KeyA => Self::A,
            WK::KeyB => Self::B,
            WK::KeyC => Self::C,
            WK::KeyD => Self::D,
            WK::KeyE => Self::E,
            WK::KeyF => Self::F,
            WK::KeyG => Self::G,
            WK::KeyH => Self::H,
            WK::KeyI => Self::I,
            WK::KeyJ => Self::J,
            WK::KeyK => Self::K,
            WK::KeyL => Self::L,
            WK::KeyM => Self::M,
            WK::KeyN => Self::N,
            WK::KeyO => Self::O,
            WK::KeyP => Self::P,
            WK::KeyQ => Self::Q,
            WK::KeyR => Self::R,
            WK::KeyS => Self::S,
            WK::KeyT => Self::T,
            WK::KeyU => Self::U,
            WK::KeyV => Self::V,
            WK::KeyW => Self::W,
            WK::KeyX => Self::X,
            WK::KeyY => Self::Y,
            WK::KeyZ => Self::Z,

            WK::Digit0 => Self::Num0,
            WK::Digit1 => Self::Num1,
            WK::Digit2 => Self::Num2,
            WK::Digit3 => Self::Num3,
            WK::Digit4 => Self::Num4,
            WK::Digit5 => Self::Num5,
            WK::Digit6 => Self::Num6,
            WK::Digit7 => Self::Num7,
            WK::Digit8 => Self::Num8,
            WK::Digit9 => Self::Num9,

            WK::F1 => Self::F1,
            WK::F2 => Self::F2,
            WK::F3 => Self::F3,
            WK::F4 => Self::F4,
            WK::F5 => Self::F5,
            WK::F6 => Self::F6,
            WK::F7 => Self::F7,
            WK::F8 => Self::F8,
            WK::F9 => Self::F9,
            WK::F10 => Self::F10,
            WK::F11 => Self::F11,
            WK::F12 => Self::F12,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,

            WK::Insert => Self::Insert,
            WK::Delete => Self::Delete,
            WK::Home => Self::Home,
            WK::End => Self::End,
            WK::PageUp => Self::PageUp,
            WK::PageDown => Self::PageDown,
            WK::PrintScreen => Self::PrintScreen,
            WK::ScrollLock => Self::ScrollLock,
            WK::Pause => Self::Pause,

            WK::ShiftLeft => Self::LeftShift,
            WK::ShiftRight => Self::RightShift,
            WK::ControlLeft => Self::LeftControl,
            WK::ControlRight => Self::RightControl,
            WK::AltLeft => Self::LeftAlt,
            WK::AltRight => Self::RightAlt,
            WK::SuperLeft => Self::LeftSuper,
            WK::SuperRight => Self::RightSuper,

            WK::Minus => Self::Dash,
            WK::Equal => Self::Equals,
            WK::Quote => Self::Apostrophe,
            WK::Semicolon => Self::Semicolon,
            WK::Comma => Self::Comma,
            WK::Period => Self::Period,
            WK::Slash => Self::Slash,
            WK::Backslash => Self::Backslash,
            WK::Backquote => Self::Grave,
            WK::BracketLeft => Self::LeftBracket,
            WK::BracketRight => Self::RightBracket,

            WK::NumLock => Self::NumLock,
            WK::Numpad0 => Self::NumPad0,
            WK::Numpad1 => Self::NumPad1,
            WK::Numpad2 => Self::NumPad2,
            WK::Numpad3 => Self::NumPad3,
            WK::Numpad4 => Self::NumPad4,
            WK::Numpad5 => Self::NumPad5,
            WK::Numpad6 => Self::NumPad6,
            WK::Numpad7 => Self::NumPad7,
            WK::Numpad8 => Self::NumPad8,
            WK::Numpad9 => Self::NumPad9,
            WK::NumpadDecimal => Self::NumPadDecimal,
            WK::NumpadDivide => Self::NumPadDivide,
            WK::NumpadMultiply => Self::NumPadMultiply,
            WK::NumpadSubtract => Self::NumPadSubtract,
            WK::NumpadAdd => Self::NumPadAdd,
            WK::NumpadEnter => Self::NumPadEnter,

            _ => Self::Other,
        }
    }
}

/// Tracks which keys are held at the current tick
///
/// Every key has a slot up front, so ingestion never reshapes the table and
/// only needs the per-key lock.
#[derive(Debug, Default)]
pub struct KeyManager {
    keys: EnumMap<Key, KeyState>,
}

impl KeyManager {
    /// Creates a manager with every key released
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw press or release
    pub(crate) fn set(&self, key: Key, pressed: bool) {
        self.keys[key].set(pressed);
    }

    /// Returns a snapshot of a key's state
    pub fn get(&self, key: Key) -> KeyState {
        self.keys[key].clone()
    }

    pub(crate) fn update(&mut self) {
        for state in self.keys.values() {
            state.commit();
        }
    }
}
