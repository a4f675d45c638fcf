//! Spatial event notification
//!
//! Entities bind events to handlers through an [`EventComponent`]. Once per
//! tick the [`EventSystem`] evaluates every binding against the committed
//! input state, the entity's bounds and the camera, and spawns the handlers
//! of the bindings that fire.
//!
//! # Architecture
//!
//! ```text
//! InputManager ─┐
//! Camera ───────┼→ EventSystem::update → notify(binding) → Dispatcher
//! Bounds ───────┘                          (per binding)    (detached tasks)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let id = EntityId::next();
//! events.add(id, EventComponent::new(), Rect::new(0.0, 0.0, 64.0, 64.0));
//!
//! let component = events.component_mut(id).unwrap();
//! let hover = component.on(Event::hover(MouseAction::JustHovered), |e| println!("{e}"))?;
//! // Reuse the handle to extend the same binding
//! component.bind_to(hover, [handler(|_| println!("again"))])?;
//! ```

mod component;
mod dispatch;
mod geometry;
mod kind;
mod system;
mod tracker;

pub use component::{BindError, EventComponent, EventHandle};
pub use dispatch::{DispatchError, DispatchPolicy, Dispatcher, EventHandler, handler};
pub use geometry::{Rect, Screen, SpatialBounds, to_game_space};
pub use kind::{Event, KeyEvent, MouseAction, MouseButtonEvent, MouseEvent, PointerKind};
pub use system::EventSystem;
pub use tracker::{PointerTracker, transition};
