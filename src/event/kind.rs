//! Event descriptions that can be bound to an entity

use std::fmt;

use crate::input::{Key, KeyAction, MouseButton};

/// Fires when a key is in the required state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

/// Fires when a mouse button is in the required state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub action: KeyAction,
}

/// Which pointer condition a [`MouseEvent`] follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Cursor over the entity
    Hover,
    /// Cursor over the entity with the left button held
    Drag,
}

/// Pointer transition a [`MouseEvent`] fires on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    JustHovered,
    Hovering,
    JustExited,
    NotHovering,

    JustDragged,
    Dragging,
    JustReleased,
    NotDragging,
}

impl MouseAction {
    /// The pointer kind this action belongs to
    pub fn kind(self) -> PointerKind {
        match self {
            Self::JustHovered | Self::Hovering | Self::JustExited | Self::NotHovering => {
                PointerKind::Hover
            }
            Self::JustDragged | Self::Dragging | Self::JustReleased | Self::NotDragging => {
                PointerKind::Drag
            }
        }
    }
}

/// Fires on hover or drag transitions over an entity's bounds
///
/// The kind is fixed at construction. An action of the other kind never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    kind: PointerKind,
    pub action: MouseAction,
}

impl MouseEvent {
    pub fn hover(action: MouseAction) -> Self {
        Self {
            kind: PointerKind::Hover,
            action,
        }
    }

    pub fn drag(action: MouseAction) -> Self {
        Self {
            kind: PointerKind::Drag,
            action,
        }
    }

    pub fn kind(&self) -> PointerKind {
        self.kind
    }
}

/// Any bindable event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Key(KeyEvent),
    MouseButton(MouseButtonEvent),
    Mouse(MouseEvent),
}

impl Event {
    pub fn key(key: Key, action: KeyAction) -> Self {
        Self::Key(KeyEvent { key, action })
    }

    pub fn mouse_button(button: MouseButton, action: KeyAction) -> Self {
        Self::MouseButton(MouseButtonEvent { button, action })
    }

    pub fn hover(action: MouseAction) -> Self {
        Self::Mouse(MouseEvent::hover(action))
    }

    pub fn drag(action: MouseAction) -> Self {
        Self::Mouse(MouseEvent::drag(action))
    }

    /// Human readable name of the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Key(_) => "Key Event",
            Self::MouseButton(_) => "MouseButton Event",
            Self::Mouse(_) => "MouseEvent",
        }
    }
}

impl From<KeyEvent> for Event {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<MouseButtonEvent> for Event {
    fn from(event: MouseButtonEvent) -> Self {
        Self::MouseButton(event)
    }
}

impl From<MouseEvent> for Event {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(e) => write!(f, "{} ({:?} {:?})", self.type_name(), e.key, e.action),
            Self::MouseButton(e) => {
                write!(f, "{} ({:?} {:?})", self.type_name(), e.button, e.action)
            }
            Self::Mouse(e) => write!(f, "{} ({:?} {:?})", self.type_name(), e.kind, e.action),
        }
    }
}
