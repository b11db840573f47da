//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Session driving settings.
    pub session: SessionConfig,
    /// Asset locations.
    pub assets: AssetConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration. Only the aspect ratio reaches the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// How the host drives a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for every random draw in the scene. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Display refresh rate the frame loop paces itself to.
    pub target_fps: u32,
    /// Stop after this many frames. `None` runs until the process is killed.
    pub max_frames: Option<u64>,
    /// Simulate a click at the viewport center on this frame.
    pub click_at_frame: Option<u64>,
}

/// Where the scene's external resources come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// One image per photo cloud, in group order.
    pub image_paths: Vec<String>,
    /// Typeface used for the text rings.
    pub font_path: String,
    /// Background music started by the intro.
    pub audio_url: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a frame summary every this many frames (0 disables).
    pub frame_summary_interval: u64,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Starlit".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            target_fps: 60,
            max_frames: None,
            click_at_frame: None,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            image_paths: (1..=6).map(|i| format!("images/img{i}.jpg")).collect(),
            font_path: "fonts/helvetiker_regular.typeface.json".to_string(),
            audio_url: "https://files.catbox.moe/6iqvxp.mp3".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frame_summary_interval: 120,
        }
    }
}

impl WindowConfig {
    /// Width over height, guarding against a zero-height viewport.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

// --- Load / Save ---

const CONFIG_FILE: &str = "config.ron";

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })?;
        Ok(())
    }
}
