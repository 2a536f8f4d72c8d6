//! # Effect Engine
//!
//! Scheduler for the dossier interface's decorative effects. It keeps a registry of
//! named, time-bounded visual effects and a set of named cycling selections, and
//! answers "what is active right now" for a renderer once per frame.
//!
//! ## Core Components
//!
//! - **clock**: Millisecond clock abstraction (monotonic and manual)
//! - **effects**: Effect records, the closed set of effect kinds, fade curves
//! - **scheduler**: The registry itself, plus cycling selections
//!
//! ## Frame Contract
//!
//! The owner calls [`EffectScheduler::advance`] exactly once per frame, then any number
//! of queries. Every query between two `advance` calls sees the same snapshot.
//! The engine performs no I/O and never interprets an effect's kind.

pub mod clock;
pub mod effects;
pub mod error;
pub mod scheduler;

pub use clock::*;
pub use effects::*;
pub use error::*;
pub use scheduler::*;
