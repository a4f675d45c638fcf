//! Double-buffered channel state with edge detection

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Transition observed on a channel between the previous and the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyAction {
    /// Released on both ticks
    #[default]
    Up,
    /// Held on both ticks
    Down,
    /// Pressed this tick (edge)
    JustDown,
    /// Released this tick (edge)
    JustUp,
}

impl KeyAction {
    fn from_levels(last: bool, current: bool) -> Self {
        match (last, current) {
            (false, true) => Self::JustDown,
            (true, false) => Self::JustUp,
            (true, true) => Self::Down,
            (false, false) => Self::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Levels {
    last: bool,
    current: bool,
    /// Most recent raw level, promoted into `current` on commit
    staged: bool,
}

/// State of one key or mouse button
///
/// Raw ingestion calls [`KeyState::set`] any number of times per tick; only the
/// last value before [`KeyState::commit`] becomes visible. A press and release
/// that both land between two commits is not observed.
#[derive(Debug, Default)]
pub struct KeyState {
    levels: RwLock<Levels>,
}

impl KeyState {
    /// Creates a released channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw level from the platform layer
    pub(crate) fn set(&self, pressed: bool) {
        let mut levels = self.levels.write().unwrap_or_else(PoisonError::into_inner);
        levels.staged = pressed;
    }

    /// Advances the channel by one tick
    pub(crate) fn commit(&self) {
        let mut levels = self.levels.write().unwrap_or_else(PoisonError::into_inner);
        levels.last = levels.current;
        levels.current = levels.staged;
    }

    fn levels(&self) -> Levels {
        *self.levels.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the transition for the current tick
    pub fn state(&self) -> KeyAction {
        let levels = self.levels();
        KeyAction::from_levels(levels.last, levels.current)
    }

    /// Returns true if the channel went down this tick
    pub fn just_pressed(&self) -> bool {
        self.state() == KeyAction::JustDown
    }

    /// Returns true if the channel went up this tick
    pub fn just_released(&self) -> bool {
        self.state() == KeyAction::JustUp
    }

    /// Returns true if the channel has been released for at least two ticks
    pub fn up(&self) -> bool {
        self.state() == KeyAction::Up
    }

    /// Returns true if the channel has been held for at least two ticks
    pub fn down(&self) -> bool {
        self.state() == KeyAction::Down
    }

    /// Returns true on the press edge or while held
    pub fn is_pressed(&self) -> bool {
        matches!(self.state(), KeyAction::JustDown | KeyAction::Down)
    }
}

impl Clone for KeyState {
    fn clone(&self) -> Self {
        Self {
            levels: RwLock::new(self.levels()),
        }
    }
}
