use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("field dimensions must be positive, got {width}x{height}")]
    InvalidField { width: i32, height: i32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("terminal is {have:?} cells but the field needs {need:?}")]
    TerminalTooSmall { have: (u16, u16), need: (u16, u16) },
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
