//! Interactive playground: hover, drag and click a box in a window

use std::time::Instant;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use spatial_events::app::{AppConfig, InputCollector};
use spatial_events::event::{BindError, Event, EventComponent, MouseAction, Rect};
use spatial_events::input::{Key, KeyAction};
use spatial_events::sim::{Engine, EntityId};

struct Playground {
    config: AppConfig,
    window: Option<Window>,
    engine: Engine,
    collector: InputCollector,
    last_tick: Instant,
}

impl Playground {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let mut engine = Engine::from_config(&config).context("Failed to start engine")?;
        spawn_box(&mut engine).context("Failed to bind playground events")?;

        Ok(Self {
            config,
            window: None,
            engine,
            collector: InputCollector::new(),
            last_tick: Instant::now(),
        })
    }
}

/// Adds a 100x100 box at the game-space origin with logging handlers
fn spawn_box(engine: &mut Engine) -> Result<(), BindError> {
    let Some(events) = engine.events_mut() else {
        return Ok(());
    };

    let id = EntityId::next();
    events.add(id, EventComponent::new(), Rect::centered([0.0, 0.0], 100.0, 100.0));
    let Some(component) = events.component_mut(id) else {
        return Ok(());
    };

    component.on(Event::hover(MouseAction::JustHovered), move |event| {
        info!(entity = %id, %event, "Cursor entered box");
    })?;
    component.on(Event::hover(MouseAction::JustExited), move |event| {
        info!(entity = %id, %event, "Cursor left box");
    })?;
    component.on(Event::drag(MouseAction::JustDragged), move |event| {
        info!(entity = %id, %event, "Drag started");
    })?;
    component.on(Event::drag(MouseAction::JustReleased), move |event| {
        info!(entity = %id, %event, "Drag ended");
    })?;
    component.on(Event::key(Key::Space, KeyAction::JustDown), |event| {
        info!(%event, "Space pressed");
    })?;
    Ok(())
}

impl ApplicationHandler for Playground {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(self.config.window.attributes()) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );
                self.engine.resize(size.width as f32, size.height as f32);
                self.window = Some(window);
                self.last_tick = Instant::now();
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let interval = self.config.tick.interval();
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        if elapsed >= interval {
            self.last_tick = now;
            self.engine.tick(elapsed.as_secs_f32());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.collector.handle_window_event(&event, &mut self.engine);

        if let WindowEvent::CloseRequested = event {
            info!("Close requested, exiting");
            event_loop.exit();
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load_from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using default configuration");
        AppConfig::defaults()
    });
    info!(profile = %config.profile, "Starting playground");

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = Playground::new(config)?;
    event_loop
        .run_app(&mut app)
        .context("Failed to run event loop")?;
    Ok(())
}
