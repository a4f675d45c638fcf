//! Platform adapter
//!
//! Configuration, window attributes and translation of winit events into raw
//! input for the engine.

pub mod config;
mod collector;

pub use collector::InputCollector;
pub use config::{AppConfig, DispatchConfig, InputConfig, PolicyKind, TickConfig, WindowConfig};
