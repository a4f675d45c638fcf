//! Raw input collection from winit events

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{ModifiersState, PhysicalKey};

use crate::input::{Key, Modifiers, MouseButton};
use crate::sim::Engine;

/// Pixel deltas are converted to wheel lines at this rate
const PIXELS_PER_LINE: f32 = 20.0;

/// Feeds winit window events into an [`Engine`]
///
/// Events are applied as raw ingestion; nothing becomes visible until the
/// engine's next tick commits it.
#[derive(Debug, Clone)]
pub struct InputCollector {
    modifiers: Modifiers,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::empty(),
        }
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent, engine: &mut Engine) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                engine
                    .input()
                    .set_mouse_position(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = mouse_button(*button) {
                    engine
                        .input()
                        .set_mouse_button(button, self.modifiers, state.is_pressed());
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let [dx, dy] = scroll_lines(*delta);
                engine.input().set_mouse_scroll(dx, dy);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers_from(modifiers.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    engine.input().set_key(Key::from(code), pressed);
                }
            }

            WindowEvent::Resized(size) => {
                engine.resize(size.width as f32, size.height as f32);
            }

            _ => {}
        }
    }

    /// Modifiers currently held
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn modifiers_from(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::CONTROL, state.control_key());
    modifiers.set(Modifiers::ALT, state.alt_key());
    modifiers.set(Modifiers::SUPER, state.super_key());
    modifiers
}

/// Converts a wheel delta into lines
fn scroll_lines(delta: MouseScrollDelta) -> [f32; 2] {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => [x, y],
        MouseScrollDelta::PixelDelta(pos) => [
            pos.x as f32 / PIXELS_PER_LINE,
            pos.y as f32 / PIXELS_PER_LINE,
        ],
    }
}
