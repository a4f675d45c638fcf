//! Tick driver tying input, world and screen together

use tracing::{debug, info};

use super::{CameraSystem, TickContext, World};
use crate::app::AppConfig;
use crate::event::{DispatchError, Dispatcher, EventSystem, Screen};
use crate::input::InputManager;

/// Explicit platform context
///
/// The platform layer feeds raw input into [`Engine::input`] between ticks and
/// calls [`Engine::tick`] once per simulation step.
#[derive(Debug)]
pub struct Engine {
    input: InputManager,
    world: World,
    screen: Screen,
    scale_on_resize: bool,
}

impl Engine {
    /// Creates an engine with an empty world
    pub fn new(screen: Screen) -> Self {
        Self {
            input: InputManager::new(),
            world: World::new(),
            screen,
            scale_on_resize: false,
        }
    }

    /// Creates an engine with a camera system, an event system and the
    /// configured input bindings
    pub fn from_config(config: &AppConfig) -> Result<Self, DispatchError> {
        let window = &config.window;
        let mut engine = Self::new(Screen::new(window.width as f32, window.height as f32));
        engine.scale_on_resize = window.scale_on_resize;
        config.input.register(&mut engine.input);

        let dispatcher = Dispatcher::with_worker_threads(
            config.dispatch.policy(),
            config.dispatch.worker_threads,
        )?;
        engine.world.add_system(Box::new(CameraSystem::default()));
        engine.world.add_system(Box::new(EventSystem::new(dispatcher)));

        info!(
            profile = %config.profile,
            game.width = engine.screen.game_width,
            game.height = engine.screen.game_height,
            "Engine initialized"
        );
        Ok(engine)
    }

    /// When true, resizing keeps the game resolution and only rescales the canvas
    pub fn with_scale_on_resize(mut self, scale_on_resize: bool) -> Self {
        self.scale_on_resize = scale_on_resize;
        self
    }

    /// Runs one tick: commit input, update the world, then drop the wheel pulse
    pub fn tick(&mut self, dt: f32) {
        self.input.update();
        let ctx = TickContext::new(&self.input, &self.screen);
        self.world.tick(dt, &ctx);
        self.input.reset_scroll();
    }

    /// Records a new canvas size; zero-sized (minimized) canvases are ignored
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            debug!(width, height, "Ignoring zero-sized resize");
            return;
        }
        self.screen.canvas_width = width;
        self.screen.canvas_height = height;
        if !self.scale_on_resize {
            self.screen.game_width = width;
            self.screen.game_height = height;
        }
        debug!(width, height, scale_on_resize = self.scale_on_resize, "Canvas resized");
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Mutable input access for registering axes and buttons
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The world's event system, if one was added
    pub fn events_mut(&mut self) -> Option<&mut EventSystem> {
        self.world.system_mut::<EventSystem>()
    }

    /// The world's camera system, if one was added
    pub fn camera(&self) -> Option<&CameraSystem> {
        self.world.system::<CameraSystem>()
    }
}
