//! Effect records held by the scheduler.

mod fade;
mod kind;

pub use fade::*;
pub use kind::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Millis;

/// Identifies one registration of an effect.
///
/// Re-registering a key produces a new id, so a renderer can tell a restarted
/// effect from the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub Uuid);

impl EffectId {
    /// Create a new random effect ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EffectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, time-bounded visual directive.
///
/// Only the scheduler constructs effects, which keeps `duration` positive and
/// fixed for the effect's whole life.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effect {
    id: EffectId,
    key: String,
    kind: EffectKind,
    started_at: Millis,
    duration: Millis,
}

impl Effect {
    pub(crate) fn new(key: String, kind: EffectKind, started_at: Millis, duration: Millis) -> Self {
        Self {
            id: EffectId::new(),
            key,
            kind,
            started_at,
            duration,
        }
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    /// Time since registration. A clock that went backwards reads as zero.
    pub fn elapsed_at(&self, now: Millis) -> Millis {
        now.saturating_sub(self.started_at)
    }

    /// Active iff `now - started_at < duration`.
    pub fn is_active_at(&self, now: Millis) -> bool {
        self.elapsed_at(now) < self.duration
    }

    /// Elapsed fraction of the lifetime, clamped to 0.0 - 1.0.
    pub fn progress_at(&self, now: Millis) -> f32 {
        let ratio = self.elapsed_at(now) as f64 / self.duration as f64;
        ratio.clamp(0.0, 1.0) as f32
    }

    /// Milliseconds left before expiry.
    pub fn remaining_at(&self, now: Millis) -> Millis {
        self.duration.saturating_sub(self.elapsed_at(now))
    }

    /// Alpha under `curve` at `now`.
    pub fn alpha_at(&self, now: Millis, curve: FadeCurve) -> f32 {
        curve.alpha(self.progress_at(now))
    }
}
