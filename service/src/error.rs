use std::path::PathBuf;

use mines_core::GameError;
use thiserror::Error;

use crate::PlayerId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Player {0} has no active game, start a new game first")]
    NoActiveSession(PlayerId),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure reading or writing the statistics file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not access stats file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed stats file {path}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid default game")]
    DefaultGame(#[from] GameError),
}
