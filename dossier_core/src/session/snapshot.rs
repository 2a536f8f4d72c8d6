//! Per-frame snapshots handed to the renderer.

use effect_engine::{Effect, EffectId, EffectKind, Millis, Rgba};
use serde::Serialize;

/// What to draw for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub now: Millis,
    pub screen: String,
    pub content: Option<ContentView>,
    /// Sorted by key for stable output; renderers must not rely on the order.
    pub effects: Vec<ActiveEffectView>,
}

impl FrameSnapshot {
    /// Encode as a single JSON line.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The content entry on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentView {
    pub sequence: String,
    pub index: usize,
    pub title: String,
    pub body: String,
}

/// One running effect, with its timing already evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveEffectView {
    pub id: EffectId,
    pub key: String,
    pub kind: EffectKind,
    pub progress: f32,
    pub alpha: f32,
    /// The kind's colour with `alpha` applied. `None` for colourless kinds.
    pub tint: Option<Rgba>,
    pub remaining_ms: Millis,
}

impl ActiveEffectView {
    pub fn capture(effect: &Effect, now: Millis) -> Self {
        let alpha = effect.alpha_at(now, effect.kind().default_fade());
        Self {
            id: effect.id(),
            key: effect.key().to_string(),
            kind: effect.kind().clone(),
            progress: effect.progress_at(now),
            alpha,
            tint: effect
                .kind()
                .color()
                .map(|color| color.with_alpha_factor(alpha)),
            remaining_ms: effect.remaining_at(now),
        }
    }
}
