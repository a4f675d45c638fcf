//! Spatial Events
//!
//! Input-state tracking and spatial event notification for tick-driven games.

/// Platform adapter - configuration, window setup and winit ingestion
pub mod app;

/// Spatial events - bindings, hit testing and handler dispatch
pub mod event;

/// Input state - keys, mouse and named controls
pub mod input;

/// Simulation - world, systems, camera and the tick driver
pub mod sim;
