//! TOML configuration: tick rate, content sequences and the command table.

use effect_engine::{EffectKind, Millis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::ContentEntry;
use crate::commands::{CommandAction, EffectCue};
use crate::error::{DossierError, Result};

/// The dossier shipped with the binary.
pub const EMBEDDED_DOSSIER: &str = include_str!("../assets/dossier.toml");

/// Full configuration of a dossier session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DossierConfig {
    /// Frame interval for hosts that drive `frame` on a timer.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: Millis,

    /// Screen shown before any command runs.
    #[serde(default = "default_start_screen")]
    pub start_screen: String,

    /// Cue fired when a command is not recognized.
    #[serde(default = "default_fallback")]
    pub fallback: Option<EffectCue>,

    /// Content sequences by name.
    #[serde(default)]
    pub sequences: BTreeMap<String, Vec<ContentEntry>>,

    /// Commands by canonical name.
    #[serde(default)]
    pub commands: BTreeMap<String, CommandAction>,
}

fn default_tick_ms() -> Millis {
    33
}

fn default_start_screen() -> String {
    "dossier".to_string()
}

fn default_fallback() -> Option<EffectCue> {
    Some(EffectCue::new(
        "unrecognized",
        400,
        EffectKind::Glitch { intensity: 0.5 },
    ))
}

impl Default for DossierConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            start_screen: default_start_screen(),
            fallback: default_fallback(),
            sequences: BTreeMap::new(),
            commands: BTreeMap::new(),
        }
    }
}

impl DossierConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DossierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The configuration embedded in the crate.
    pub fn default_embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_DOSSIER)
    }
}
