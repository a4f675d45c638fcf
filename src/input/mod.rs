//! Input state tracking
//!
//! Raw platform signals are turned into double-buffered per-channel state:
//!
//! ```text
//! Platform callbacks → InputManager::set_* (staged)
//!                            ↓
//!                  InputManager::update (commit, once per tick)
//!                            ↓
//!               KeyState::state / Axis / Button (reads)
//! ```
//!
//! # Usage
//!
//! ```
//! use spatial_events::input::{InputManager, Key, KeyAction};
//!
//! let mut input = InputManager::new();
//! input.set_key(Key::Space, true);
//! input.update();
//! assert_eq!(input.key(Key::Space).state(), KeyAction::JustDown);
//! ```

mod keys;
mod manager;
mod mouse;
mod state;

pub use keys::{Key, KeyManager};
pub use manager::{AXIS_MAX, AXIS_MIN, AXIS_NEUTRAL, Axis, AxisPair, Button, Channel, InputManager};
pub use mouse::{Modifiers, MouseButton, MouseManager};
pub use state::{KeyAction, KeyState};
