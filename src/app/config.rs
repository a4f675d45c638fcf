//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use crate::event::DispatchPolicy;
use crate::input::{AxisPair, Channel, InputManager};

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width, also the initial game resolution
    pub width: f64,
    /// Window height, also the initial game resolution
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Keep the game resolution on resize and only rescale the canvas
    pub scale_on_resize: bool,
}

impl WindowConfig {
    /// Winit attributes for the main window
    pub fn attributes(&self) -> WindowAttributes {
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_resizable(self.resizable)
            .with_decorations(self.decorated);

        if self.fullscreen {
            attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
        } else {
            attrs
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spatial Events".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            scale_on_resize: false,
        }
    }
}

/// Simulation tick configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Ticks per second
    pub fps_limit: u32,
}

impl TickConfig {
    /// Time between two ticks
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps_limit.max(1)
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self { fps_limit: 60 }
    }
}

/// Handler pool limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Unbounded,
    Bounded,
}

/// Handler dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub policy: PolicyKind,
    /// Only used by the bounded policy
    pub max_in_flight: usize,
    /// Async worker threads of the handler runtime
    pub worker_threads: usize,
}

impl DispatchConfig {
    pub fn policy(&self) -> DispatchPolicy {
        match self.policy {
            PolicyKind::Unbounded => DispatchPolicy::Unbounded,
            PolicyKind::Bounded => DispatchPolicy::Bounded {
                max_in_flight: self.max_in_flight,
            },
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Unbounded,
            max_in_flight: 256,
            worker_threads: 2,
        }
    }
}

/// Named logical inputs registered at start-up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub buttons: HashMap<String, Vec<Channel>>,
    pub axes: HashMap<String, Vec<AxisPair>>,
}

impl InputConfig {
    /// Registers every configured button and axis
    pub fn register(&self, input: &mut InputManager) {
        for (name, triggers) in &self.buttons {
            input.register_button(name.clone(), triggers.iter().copied());
        }
        for (name, pairs) in &self.axes {
            input.register_axis(name.clone(), pairs.iter().copied());
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    pub tick: TickConfig,
    pub dispatch: DispatchConfig,
    pub input: InputConfig,
}

impl AppConfig {
    /// Built-in configuration, without reading files or the environment
    pub fn defaults() -> Self {
        Self {
            profile: "debug".to_string(),
            window: WindowConfig::default(),
            tick: TickConfig::default(),
            dispatch: DispatchConfig::default(),
            input: InputConfig::default(),
        }
    }

    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_WINDOW__WIDTH=1920)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));
        Self::load_from_dir(&config_dir, profile)
    }

    /// Loads `{dir}/{profile}.toml` followed by APP_ environment overrides
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile_path = dir.join(profile);
        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "debug"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "debug".to_string());
        Self::load(&profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::defaults()
    }
}
