//! # Dossier Core
//!
//! The dossier interface around the effect engine. This crate owns the content
//! catalog, the command table and the session that drives the scheduler once per
//! frame.
//!
//! ## Core Components
//!
//! - **catalog**: Named sequences of pre-authored content entries
//! - **commands**: Token lookup table and the data-driven command handlers
//! - **config**: TOML configuration, with an embedded default dossier
//! - **session**: Frame loop owner producing renderer snapshots
//!
//! ## Design Philosophy
//!
//! - **Data-Driven**: Commands, content and effect cues all come from configuration
//! - **Single Owner**: The session exclusively owns the scheduler; no global state
//! - **Renderer-Agnostic**: Frames are plain serializable snapshots

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;

pub use catalog::*;
pub use commands::*;
pub use config::*;
pub use error::{DossierError, Result};
pub use session::*;
