//! Per-entity event bindings

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::warn;

use super::dispatch::EventHandler;
use super::kind::Event;
use super::tracker::PointerTracker;

/// Identifies one binding
///
/// Every call to [`EventComponent::bind`] yields a new handle with its own
/// hover/drag progress. Keep the handle and pass it to
/// [`EventComponent::bind_to`] to add handlers to the same binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventHandle(u64);

impl EventHandle {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EventHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reasons a binding was not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("event component is not added to an event system")]
    NotAttached,
    #[error("no binding with handle {0}")]
    UnknownHandle(EventHandle),
}

/// One bound event with its handlers and pointer progress
pub(crate) struct Binding {
    pub(crate) handle: EventHandle,
    pub(crate) event: Event,
    pub(crate) tracker: Option<PointerTracker>,
    pub(crate) handlers: Vec<EventHandler>,
}

impl Binding {
    fn new(event: Event) -> Self {
        let tracker = match event {
            Event::Mouse(mouse) => Some(PointerTracker::new(mouse.kind())),
            _ => None,
        };
        Self {
            handle: EventHandle::next(),
            event,
            tracker,
            handlers: Vec::new(),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("handle", &self.handle)
            .field("event", &self.event)
            .field("tracker", &self.tracker)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Event bindings owned by one entity
///
/// Bindings are only accepted once the component has been added to an
/// [`EventSystem`](super::EventSystem).
#[derive(Debug, Default)]
pub struct EventComponent {
    bindings: Option<Vec<Binding>>,
}

impl EventComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the binding table; called by the event system on add
    pub(crate) fn attach(&mut self) {
        self.bindings = Some(Vec::new());
    }

    pub fn is_attached(&self) -> bool {
        self.bindings.is_some()
    }

    /// Binds `handlers` to a new instance of `event`
    pub fn bind(
        &mut self,
        event: impl Into<Event>,
        handlers: impl IntoIterator<Item = EventHandler>,
    ) -> Result<EventHandle, BindError> {
        let event = event.into();
        let Some(bindings) = self.bindings.as_mut() else {
            warn!(%event, "Event system not added, unable to bind event");
            return Err(BindError::NotAttached);
        };

        if let Event::Mouse(mouse) = event
            && mouse.action.kind() != mouse.kind()
        {
            warn!(%event, "Pointer action does not match event kind and will never fire");
        }

        let mut binding = Binding::new(event);
        binding.handlers.extend(handlers);
        let handle = binding.handle;
        bindings.push(binding);
        Ok(handle)
    }

    /// Binds a single closure to a new instance of `event`
    pub fn on<F>(&mut self, event: impl Into<Event>, f: F) -> Result<EventHandle, BindError>
    where
        F: Fn(Event) + Send + Sync + 'static,
    {
        self.bind(event, [super::dispatch::handler(f)])
    }

    /// Appends `handlers` to an existing binding
    pub fn bind_to(
        &mut self,
        handle: EventHandle,
        handlers: impl IntoIterator<Item = EventHandler>,
    ) -> Result<(), BindError> {
        let Some(bindings) = self.bindings.as_mut() else {
            warn!(%handle, "Event system not added, unable to bind event");
            return Err(BindError::NotAttached);
        };

        let binding = bindings
            .iter_mut()
            .find(|binding| binding.handle == handle)
            .ok_or(BindError::UnknownHandle(handle))?;
        binding.handlers.extend(handlers);
        Ok(())
    }

    /// Removes a binding, returning true if it existed
    pub fn unbind(&mut self, handle: EventHandle) -> bool {
        let Some(bindings) = self.bindings.as_mut() else {
            return false;
        };
        let before = bindings.len();
        bindings.retain(|binding| binding.handle != handle);
        bindings.len() != before
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of handlers bound under `handle`
    pub fn handler_count(&self, handle: EventHandle) -> usize {
        self.bindings()
            .iter()
            .find(|binding| binding.handle == handle)
            .map_or(0, |binding| binding.handlers.len())
    }

    /// Current hover/drag progress of a pointer binding
    pub fn tracker(&self, handle: EventHandle) -> Option<PointerTracker> {
        self.bindings()
            .iter()
            .find(|binding| binding.handle == handle)
            .and_then(|binding| binding.tracker)
    }

    pub(crate) fn bindings(&self) -> &[Binding] {
        self.bindings.as_deref().unwrap_or_default()
    }

    pub(crate) fn bindings_mut(&mut self) -> &mut [Binding] {
        self.bindings.as_deref_mut().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MouseAction, handler};
    use crate::input::{Key, KeyAction};

    fn noop() -> EventHandler {
        handler(|_| {})
    }

    #[test]
    fn test_bind_before_attach_is_dropped() {
        let mut component = EventComponent::new();
        let result = component.bind(Event::key(Key::A, KeyAction::Down), [noop()]);
        assert_eq!(result, Err(BindError::NotAttached));
        assert!(component.is_empty());
    }

    #[test]
    fn test_same_handle_shares_a_bucket() {
        let mut component = EventComponent::new();
        component.attach();

        let handle = component
            .bind(Event::hover(MouseAction::JustHovered), [noop()])
            .unwrap();
        component.bind_to(handle, [noop(), noop()]).unwrap();

        assert_eq!(component.len(), 1);
        assert_eq!(component.handler_count(handle), 3);
    }

    #[test]
    fn test_equal_events_get_distinct_buckets() {
        let mut component = EventComponent::new();
        component.attach();

        let event = Event::hover(MouseAction::Hovering);
        let first = component.bind(event, [noop()]).unwrap();
        let second = component.bind(event, [noop()]).unwrap();

        assert_ne!(first, second);
        assert_eq!(component.len(), 2);
        assert_eq!(
            component.tracker(first),
            Some(PointerTracker::Hover { triggered: false })
        );
    }

    #[test]
    fn test_unknown_handle() {
        let mut component = EventComponent::new();
        component.attach();
        let mut other = EventComponent::new();
        other.attach();
        let foreign = other.on(Event::key(Key::B, KeyAction::Up), |_| {}).unwrap();

        assert_eq!(
            component.bind_to(foreign, [noop()]),
            Err(BindError::UnknownHandle(foreign))
        );
    }

    #[test]
    fn test_unbind() {
        let mut component = EventComponent::new();
        component.attach();
        let handle = component.on(Event::key(Key::C, KeyAction::JustUp), |_| {}).unwrap();

        assert!(component.unbind(handle));
        assert!(!component.unbind(handle));
        assert!(component.is_empty());
    }

    #[test]
    fn test_attach_resets_bindings() {
        let mut component = EventComponent::new();
        component.attach();
        component.on(Event::key(Key::D, KeyAction::Down), |_| {}).unwrap();

        component.attach();
        assert!(component.is_empty());
        assert!(component.is_attached());
    }

    #[test]
    fn test_key_bindings_have_no_tracker() {
        let mut component = EventComponent::new();
        component.attach();
        let handle = component.on(Event::key(Key::E, KeyAction::Down), |_| {}).unwrap();
        assert_eq!(component.tracker(handle), None);
    }
}
