//! Per-tick event evaluation and dispatch

use std::any::Any;
use std::fmt;

use tracing::{debug, info, trace};

use super::component::{Binding, EventComponent};
use super::dispatch::Dispatcher;
use super::geometry::{Screen, SpatialBounds, to_game_space};
use super::kind::{Event, PointerKind};
use crate::input::{InputManager, MouseButton};
use crate::sim::{Camera, CameraSystem, EntityId, SharedCamera, System, TickContext};

/// Registry entry for one entity
struct EventEntity {
    id: EntityId,
    component: EventComponent,
    bounds: Box<dyn SpatialBounds>,
}

/// Inputs a binding is evaluated against for one tick
struct Frame<'a> {
    input: &'a InputManager,
    screen: &'a Screen,
    camera: Option<Camera>,
}

/// Evaluates bound events each tick and spawns the handlers of those that fire
///
/// Entities are evaluated in the order they were added and bindings in the
/// order they were bound. Handlers are spawned in that order but run
/// concurrently with each other and with later ticks.
pub struct EventSystem {
    entities: Vec<EventEntity>,
    camera: Option<SharedCamera>,
    dispatcher: Dispatcher,
}

impl EventSystem {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            entities: Vec::new(),
            camera: None,
            dispatcher,
        }
    }

    /// Uses `camera` for pointer events instead of searching sibling systems
    pub fn with_camera(mut self, camera: SharedCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Returns true if pointer events can be evaluated
    pub fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Registers an entity; its component's bindings are reset
    pub fn add(
        &mut self,
        id: EntityId,
        mut component: EventComponent,
        bounds: impl SpatialBounds + 'static,
    ) {
        component.attach();
        self.entities.push(EventEntity {
            id,
            component,
            bounds: Box::new(bounds),
        });
        debug!(entity = %id, "Entity added to event system");
    }

    /// Removes the first entity with `id`; does nothing if it is absent
    ///
    /// Handlers already spawned for the entity keep running.
    pub fn remove(&mut self, id: EntityId) -> Option<EventComponent> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        debug!(entity = %id, "Entity removed from event system");
        Some(self.entities.remove(index).component)
    }

    pub fn component(&self, id: EntityId) -> Option<&EventComponent> {
        self.entities
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| &entity.component)
    }

    pub fn component_mut(&mut self, id: EntityId) -> Option<&mut EventComponent> {
        self.entities
            .iter_mut()
            .find(|entity| entity.id == id)
            .map(|entity| &mut entity.component)
    }

    /// Replaces an entity's bounds, returning false if it is not registered
    pub fn set_bounds(&mut self, id: EntityId, bounds: impl SpatialBounds + 'static) -> bool {
        match self.entities.iter_mut().find(|entity| entity.id == id) {
            Some(entity) => {
                entity.bounds = Box::new(bounds);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Evaluates every binding once and dispatches the handlers of those that fire
    pub fn update(&mut self, _dt: f32, input: &InputManager, screen: &Screen) {
        let frame = Frame {
            input,
            screen,
            camera: self.camera.as_ref().map(SharedCamera::get),
        };

        for entity in &mut self.entities {
            for binding in entity.component.bindings_mut() {
                if !notify(binding, entity.bounds.as_ref(), &frame) {
                    continue;
                }
                trace!(entity = %entity.id, event = %binding.event, "Event triggered");
                for handler in &binding.handlers {
                    self.dispatcher.dispatch(handler, binding.event);
                }
            }
        }
    }
}

/// Evaluates one binding; pointer bindings advance their tracker
fn notify(binding: &mut Binding, bounds: &dyn SpatialBounds, frame: &Frame<'_>) -> bool {
    match binding.event {
        Event::Key(event) => frame.input.key(event.key).state() == event.action,
        Event::MouseButton(event) => {
            frame.input.mouse_button(event.button).state() == event.action
        }
        Event::Mouse(event) => {
            let (Some(camera), Some(tracker)) = (frame.camera.as_ref(), binding.tracker.as_mut())
            else {
                return false;
            };

            let point = to_game_space(frame.input.mouse_position(), camera, frame.screen);
            let within = bounds.within(point);
            let active = match tracker.kind() {
                PointerKind::Hover => within,
                PointerKind::Drag => {
                    within && frame.input.mouse_button(MouseButton::Left).is_pressed()
                }
            };
            tracker.advance(active, event.action)
        }
    }
}

impl System for EventSystem {
    fn name(&self) -> &str {
        "events"
    }

    fn initialize(&mut self, siblings: &[Box<dyn System>]) {
        if self.camera.is_some() {
            return;
        }
        self.camera = siblings
            .iter()
            .find_map(|system| system.as_any().downcast_ref::<CameraSystem>())
            .map(CameraSystem::camera);

        if self.camera.is_none() {
            info!("No camera system found, pointer events are disabled");
        }
    }

    fn update(&mut self, dt: f32, ctx: &TickContext<'_>) {
        EventSystem::update(self, dt, ctx.input, ctx.screen);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSystem")
            .field("entities", &self.entities.len())
            .field("has_camera", &self.has_camera())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
