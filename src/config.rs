use std::{env, fs, io, path::{Path, PathBuf}};

use log::{info, warn};
use serde::Deserialize;

use crate::error::{GameError, Result};

pub const CONFIG_PATH_VAR: &str = "SNAKE_CONFIG";
pub const TPS_VAR: &str = "SNAKE_TICKS_PER_SECOND";
const DEFAULT_CONFIG_PATH: &str = "snake.toml";

/// Game settings, loaded from `snake.toml` when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field: FieldConfig,
    /// Distance covered per tick.
    pub step: i32,
    /// Edge of the drawn marker, and the number of field units per terminal cell.
    pub marker_size: i32,
    pub ticks_per_second: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config { field: FieldConfig::default(), step: 10, marker_size: 10, ticks_per_second: 30 }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig { width: 400, height: 300 }
    }
}

impl Config {
    /// Reads the file named by `SNAKE_CONFIG` (or `snake.toml`), then applies
    /// env overrides. A missing file means defaults.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = Config::from_file(&path)?;
        config.apply_env_overrides(env::var(TPS_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// `tps` is the raw `SNAKE_TICKS_PER_SECOND` value. Non-numbers are
    /// logged and ignored; range is left to `validate`.
    pub fn apply_env_overrides(&mut self, tps: Option<String>) {
        if let Some(val) = tps {
            match val.trim().parse::<u32>() {
                Ok(tps) => self.ticks_per_second = tps,
                Err(_) => warn!("ignoring {}={:?}, not a number", TPS_VAR, val),
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Config::from_toml(&content)
                    .map_err(|source| GameError::ConfigParse { path: path.to_owned(), source })?;
                info!("loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no {} found, using defaults", path.display());
                Ok(Config::default())
            }
            Err(source) => Err(GameError::ConfigRead { path: path.to_owned(), source }),
        }
    }

    pub fn from_toml(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Field dimensions are checked by `Field::new`.
    pub fn validate(&self) -> Result<()> {
        if self.step <= 0 {
            return Err(GameError::InvalidConfig(format!("step must be > 0, got {}", self.step)));
        }
        if self.marker_size <= 0 {
            return Err(GameError::InvalidConfig(format!("marker_size must be > 0, got {}", self.marker_size)));
        }
        if self.ticks_per_second == 0 {
            return Err(GameError::InvalidConfig("ticks_per_second must be > 0".to_string()));
        }
        Ok(())
    }
}
