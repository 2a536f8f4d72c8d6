//! Errors surfaced by the dossier layer.

use std::path::PathBuf;

use effect_engine::SchedulerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DossierError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("command '{command}' refers to unknown sequence '{sequence}'")]
    UnknownSequence { command: String, sequence: String },

    #[error("sequence '{sequence}' is not in the catalog")]
    MissingSequence { sequence: String },

    #[error("sequence '{sequence}' has no entries")]
    EmptySequence { sequence: String },

    #[error("tick_ms must be positive")]
    ZeroTick,

    #[error("command token '{token}' is claimed by both '{first}' and '{second}'")]
    DuplicateToken {
        token: String,
        first: String,
        second: String,
    },

    #[error("failed to encode frame: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = DossierError> = std::result::Result<T, E>;
