//! Configuration system
//!
//! Settings are plain serde structs. Anything implementing [`Config`] can be
//! loaded from and saved to TOML or RON files, picked by file extension.

use crate::foundation::logging::{self, LevelFilter};
pub use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk encodings understood by [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Ron,
}

impl Format {
    /// Format named by the final extension of `path`
    fn of(path: &str) -> Result<Self, ConfigError> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.to_string())),
        }
    }

    fn decode<T: for<'de> Deserialize<'de>>(self, text: &str) -> Result<T, ConfigError> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Ron => ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string())),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// Settings that persist as TOML or RON
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Read settings from a `.toml` or `.ron` file
    ///
    /// The extension is checked before the file is opened.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedFormat`] for any other extension,
    /// [`ConfigError::Io`] or [`ConfigError::Parse`] otherwise.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let format = Format::of(path)?;
        format.decode(&std::fs::read_to_string(path)?)
    }

    /// Write settings to a `.toml` or `.ron` file
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedFormat`] for any other extension,
    /// [`ConfigError::Serialize`] or [`ConfigError::Io`] otherwise.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = Format::of(path)?.encode(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Errors from loading or saving settings
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents did not decode
    #[error("config parse failed: {0}")]
    Parse(String),

    /// The settings did not encode
    #[error("config encode failed: {0}")]
    Serialize(String),

    /// The path has no `.toml` or `.ron` extension
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level name: `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl LoggingConfig {
    /// Parsed level filter; unknown names fall back to `info`
    pub fn level_filter(&self) -> LevelFilter {
        logging::parse_level(&self.level)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Render preparation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Skip the physics backend even if one is installed
    pub ignore_physics: bool,
    /// Initial capacity of the draw queue
    pub queue_capacity: usize,
    /// Re-sort alpha items against the camera before drawing
    pub sort_alpha: bool,
}

impl RenderConfig {
    /// Disable or enable physics synchronization
    pub fn with_ignore_physics(mut self, ignore_physics: bool) -> Self {
        self.ignore_physics = ignore_physics;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ignore_physics: false,
            queue_capacity: 256,
            sort_alpha: true,
        }
    }
}

/// Top-level configuration of the scene core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Render preparation settings
    pub render: RenderConfig,
}

impl SceneConfig {
    /// Initialise `env_logger` at the configured level
    ///
    /// `RUST_LOG` still overrides the level. Calling this twice is harmless.
    pub fn init_logging(&self) {
        logging::init_with_level(self.logging.level_filter());
    }
}

impl Config for SceneConfig {}
