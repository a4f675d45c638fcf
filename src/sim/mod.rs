//! Simulation module
//!
//! Holds the world, its systems and the per-tick driver.

mod camera;
mod engine;

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::Screen;
use crate::input::InputManager;

pub use camera::{Camera, CameraSystem, SharedCamera, ZOOM_MAX, ZOOM_MIN};
pub use engine::Engine;

/// Identity of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Allocates a process-unique id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only state shared with every system during a tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Input committed for this tick
    pub input: &'a InputManager,
    /// Game and canvas resolution
    pub screen: &'a Screen,
}

impl<'a> TickContext<'a> {
    pub fn new(input: &'a InputManager, screen: &'a Screen) -> Self {
        Self { input, screen }
    }
}

/// Trait that all world systems must implement
pub trait System: Any + Send {
    /// Returns the name/identifier of this system
    fn name(&self) -> &str;

    /// Called once when the system is added, with the systems added before it
    fn initialize(&mut self, _siblings: &[Box<dyn System>]) {}

    /// Updates the system by one tick
    ///
    /// # Arguments
    /// * `dt` - Scaled time elapsed since the last tick in seconds
    /// * `ctx` - Input and screen state for this tick
    fn update(&mut self, dt: f32, ctx: &TickContext<'_>);

    /// Allows downcasting to concrete types for specific operations
    fn as_any(&self) -> &dyn Any;

    /// Mutable version of as_any for type-safe mutable access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Game world state
pub struct World {
    /// Total number of simulation ticks elapsed
    tick_count: u64,
    /// Total simulation time elapsed in seconds
    sim_time: f64,
    /// Time scale multiplier (1.0 = normal speed, 0.0 = paused, 2.0 = 2x speed)
    time_scale: f32,
    /// Whether the simulation is paused
    paused: bool,
    /// Systems in the order they were added
    systems: Vec<Box<dyn System>>,
}

impl World {
    /// Creates a new world with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the time scale
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Adds a system, letting it scan the systems added before it
    pub fn add_system(&mut self, mut system: Box<dyn System>) {
        system.initialize(&self.systems);
        self.systems.push(system);
    }

    /// Updates every system by one tick
    pub fn tick(&mut self, delta_time: f32, ctx: &TickContext<'_>) {
        if self.paused {
            return;
        }

        let scaled_delta = delta_time * self.time_scale;
        self.tick_count += 1;
        self.sim_time += scaled_delta as f64;

        for system in &mut self.systems {
            system.update(scaled_delta, ctx);
        }
    }

    /// Returns the current tick count
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns the total simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Sets the time scale multiplier
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Returns the current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pauses the simulation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the simulation
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Returns whether the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns a reference to all systems
    pub fn systems(&self) -> &[Box<dyn System>] {
        &self.systems
    }

    /// Gets a typed reference to the first system of type `T`
    pub fn system<T: System>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Gets a mutable typed reference to the first system of type `T`
    pub fn system_mut<T: System>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            tick_count: 0,
            sim_time: 0.0,
            time_scale: 1.0,
            paused: false,
            systems: Vec::new(),
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.systems.iter().map(|s| s.name()).collect();
        f.debug_struct("World")
            .field("tick_count", &self.tick_count)
            .field("sim_time", &self.sim_time)
            .field("time_scale", &self.time_scale)
            .field("paused", &self.paused)
            .field("systems", &names)
            .finish()
    }
}
