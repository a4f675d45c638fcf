//! Hover/drag progress carried by a pointer binding across ticks

use super::kind::{MouseAction, PointerKind};

/// Persistent sub-state of one pointer binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTracker {
    Hover { triggered: bool },
    Drag { triggered: bool },
}

impl PointerTracker {
    /// Fresh tracker in the not-hovering / not-dragging state
    pub fn new(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Hover => Self::Hover { triggered: false },
            PointerKind::Drag => Self::Drag { triggered: false },
        }
    }

    pub fn kind(&self) -> PointerKind {
        match self {
            Self::Hover { .. } => PointerKind::Hover,
            Self::Drag { .. } => PointerKind::Drag,
        }
    }

    pub fn triggered(&self) -> bool {
        match *self {
            Self::Hover { triggered } | Self::Drag { triggered } => triggered,
        }
    }

    /// Feeds one tick's condition through the tracker and reports whether
    /// `action` fires
    pub fn advance(&mut self, active: bool, action: MouseAction) -> bool {
        let (triggered, fires) = transition(*self, active, action);
        *self = match self.kind() {
            PointerKind::Hover => Self::Hover { triggered },
            PointerKind::Drag => Self::Drag { triggered },
        };
        fires
    }
}

/// Transition table for a pointer tracker
///
/// `active` is "cursor inside" for hover and "cursor inside with the left
/// button held" for drag. Returns the next `triggered` flag and whether
/// `action` fires.
pub fn transition(tracker: PointerTracker, active: bool, action: MouseAction) -> (bool, bool) {
    use MouseAction::*;

    let (entered, held, exited, idle) = match tracker.kind() {
        PointerKind::Hover => (JustHovered, Hovering, JustExited, NotHovering),
        PointerKind::Drag => (JustDragged, Dragging, JustReleased, NotDragging),
    };

    match (tracker.triggered(), active) {
        (false, true) => (true, action == entered),
        (true, true) => (true, action == held),
        (true, false) => (false, action == exited),
        (false, false) => (false, action == idle),
    }
}
