//! Input facade and named logical controls

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::keys::{Key, KeyManager};
use super::mouse::{Modifiers, MouseButton, MouseManager};
use super::state::KeyState;

/// Maximum value an axis reaches
pub const AXIS_MAX: f32 = 1.0;
/// Value of an axis with no active pair
pub const AXIS_NEUTRAL: f32 = 0.0;
/// Minimum value an axis reaches
pub const AXIS_MIN: f32 = -1.0;

/// A single raw input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Key(Key),
    Mouse(MouseButton),
}

impl From<Key> for Channel {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for Channel {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Two channels pulling an axis in opposite directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPair {
    pub min: Channel,
    pub max: Channel,
}

impl AxisPair {
    pub fn new(min: impl Into<Channel>, max: impl Into<Channel>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Returns [`AXIS_MAX`] while `max` is held, [`AXIS_MIN`] while `min` is held
    pub fn value(&self, input: &InputManager) -> f32 {
        if input.channel(self.max).is_pressed() {
            AXIS_MAX
        } else if input.channel(self.min).is_pressed() {
            AXIS_MIN
        } else {
            AXIS_NEUTRAL
        }
    }
}

/// Named bipolar control
///
/// The default value has no pairs and always reads [`AXIS_NEUTRAL`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axis {
    pub name: String,
    pub pairs: Vec<AxisPair>,
}

impl Axis {
    /// Value of the first pair that is not neutral
    pub fn value(&self, input: &InputManager) -> f32 {
        self.pairs
            .iter()
            .map(|pair| pair.value(input))
            .find(|value| *value != AXIS_NEUTRAL)
            .unwrap_or(AXIS_NEUTRAL)
    }
}

/// Named boolean control whose triggers are ORed together
///
/// The default value has no triggers and never fires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Button {
    pub name: String,
    pub triggers: Vec<Channel>,
}

impl Button {
    pub fn just_pressed(&self, input: &InputManager) -> bool {
        self.triggers
            .iter()
            .any(|trigger| input.channel(*trigger).just_pressed())
    }

    pub fn just_released(&self, input: &InputManager) -> bool {
        self.triggers
            .iter()
            .any(|trigger| input.channel(*trigger).just_released())
    }

    pub fn down(&self, input: &InputManager) -> bool {
        self.triggers
            .iter()
            .any(|trigger| input.channel(*trigger).down())
    }
}

/// Everything input related for one process
///
/// Raw ingestion goes through `&self` and only touches per-channel locks.
/// [`InputManager::update`] needs exclusive access, which keeps commits
/// serialized to the tick.
#[derive(Debug, Default)]
pub struct InputManager {
    axes: HashMap<String, Axis>,
    buttons: HashMap<String, Button>,
    keys: KeyManager,
    mouse: MouseManager,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits every key and mouse button for this tick
    pub fn update(&mut self) {
        self.keys.update();
        self.mouse.update();
    }

    /// Registers an axis; a later registration with the same name replaces it
    pub fn register_axis(&mut self, name: impl Into<String>, pairs: impl IntoIterator<Item = AxisPair>) {
        let name = name.into();
        let axis = Axis {
            name: name.clone(),
            pairs: pairs.into_iter().collect(),
        };
        self.axes.insert(name, axis);
    }

    /// Registers a button; a later registration with the same name replaces it
    pub fn register_button(
        &mut self,
        name: impl Into<String>,
        triggers: impl IntoIterator<Item = Channel>,
    ) {
        let name = name.into();
        let button = Button {
            name: name.clone(),
            triggers: triggers.into_iter().collect(),
        };
        self.buttons.insert(name, button);
    }

    /// Looks up an axis, or an inert default if none is registered
    pub fn axis(&self, name: &str) -> Axis {
        self.axes.get(name).cloned().unwrap_or_default()
    }

    /// Looks up a button, or an inert default if none is registered
    pub fn button(&self, name: &str) -> Button {
        self.buttons.get(name).cloned().unwrap_or_default()
    }

    pub fn key(&self, key: Key) -> KeyState {
        self.keys.get(key)
    }

    pub fn mouse_button(&self, button: MouseButton) -> KeyState {
        self.mouse.button(button)
    }

    /// Returns a snapshot of any channel
    pub fn channel(&self, channel: Channel) -> KeyState {
        match channel {
            Channel::Key(key) => self.key(key),
            Channel::Mouse(button) => self.mouse_button(button),
        }
    }

    pub fn mouse_modifiers(&self) -> Modifiers {
        self.mouse.modifiers()
    }

    /// Returns true if `modifier` was held at the last mouse button change
    pub fn mouse_modifier(&self, modifier: Modifiers) -> bool {
        self.mouse.modifiers().contains(modifier)
    }

    pub fn mouse_scroll(&self) -> [f32; 2] {
        self.mouse.scroll()
    }

    pub fn mouse_position(&self) -> [f32; 2] {
        self.mouse.position()
    }

    // Raw ingestion, fed by the platform layer between ticks

    pub fn set_key(&self, key: Key, pressed: bool) {
        self.keys.set(key, pressed);
    }

    pub fn set_mouse_button(&self, button: MouseButton, modifiers: Modifiers, pressed: bool) {
        self.mouse.set_button(button, modifiers, pressed);
    }

    pub fn set_mouse_position(&self, x: f32, y: f32) {
        self.mouse.set_position(x, y);
    }

    pub fn set_mouse_scroll(&self, dx: f32, dy: f32) {
        self.mouse.set_scroll(dx, dy);
    }

    /// Clears the wheel delta so one scroll is seen on a single tick only
    pub fn reset_scroll(&self) {
        self.mouse.set_scroll(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    fn press(input: &mut InputManager, key: Key) {
        input.set_key(key, true);
        input.update();
    }

    #[test]
    fn test_unregistered_controls_are_inert() {
        let mut input = InputManager::new();
        press(&mut input, Key::Space);

        let button = input.button("jump");
        assert_eq!(button, Button::default());
        assert!(!button.just_pressed(&input));
        assert!(!button.down(&input));

        assert_eq!(input.axis("horizontal").value(&input), AXIS_NEUTRAL);
    }

    #[test]
    fn test_button_ors_its_triggers() {
        let mut input = InputManager::new();
        input.register_button(
            "fire",
            [Channel::Key(Key::F), Channel::Mouse(MouseButton::Left)],
        );

        input.set_mouse_button(MouseButton::Left, Modifiers::empty(), true);
        input.update();
        let fire = input.button("fire");
        assert!(fire.just_pressed(&input));

        input.update();
        assert!(fire.down(&input));

        input.set_mouse_button(MouseButton::Left, Modifiers::empty(), false);
        input.update();
        assert!(fire.just_released(&input));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut input = InputManager::new();
        input.register_button("jump", [Key::Space.into()]);
        input.register_button("jump", [Key::W.into()]);

        press(&mut input, Key::Space);
        assert!(!input.button("jump").just_pressed(&input));
        assert_eq!(input.button("jump").triggers, vec![Channel::Key(Key::W)]);
    }

    #[test]
    fn test_axis_reads_first_active_pair() {
        let mut input = InputManager::new();
        input.register_axis(
            "horizontal",
            [AxisPair::new(Key::A, Key::D), AxisPair::new(Key::Left, Key::Right)],
        );

        let axis = input.axis("horizontal");
        assert_eq!(axis.value(&input), AXIS_NEUTRAL);

        press(&mut input, Key::Left);
        assert_eq!(axis.value(&input), AXIS_MIN);

        press(&mut input, Key::D);
        assert_eq!(axis.value(&input), AXIS_MAX);
    }

    #[test]
    fn test_scroll_is_a_pulse() {
        let mut input = InputManager::new();
        input.set_mouse_scroll(0.0, -1.0);
        input.update();
        assert_eq!(input.mouse_scroll(), [0.0, -1.0]);

        input.reset_scroll();
        input.update();
        assert_eq!(input.mouse_scroll(), [0.0, 0.0]);
    }

    #[test]
    fn test_concurrent_readers() {
        let mut input = InputManager::new();
        press(&mut input, Key::Enter);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(input.key(Key::Enter).state(), KeyAction::JustDown);
                });
            }
        });
    }
}
