//! Effect kinds and their per-kind parameters.

use serde::{Deserialize, Serialize};

use super::FadeCurve;

/// RGBA colour, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const PHOSPHOR: Rgba = Rgba([0, 255, 65, 255]);
    pub const BLOOD: Rgba = Rgba([170, 0, 0, 255]);

    /// Create an opaque colour.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Same colour with its alpha channel scaled by `factor` (0.0 - 1.0).
    pub fn with_alpha_factor(self, factor: f32) -> Self {
        let [r, g, b, a] = self.0;
        let scaled = (a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self([r, g, b, scaled])
    }
}

/// Screen position in normalized coordinates (0.0 - 1.0 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const CENTER: Point = Point { x: 0.5, y: 0.5 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Every visual effect the renderer knows how to draw.
///
/// The scheduler carries this value through untouched; only the renderer reads
/// the parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    /// Full-screen colour flash.
    Flash { color: Rgba },

    /// Scanline tearing and character corruption.
    Glitch {
        /// Strength from 0.0 to 1.0.
        intensity: f32,
    },

    /// Border glow that breathes in and out.
    Pulse { color: Rgba, period_ms: u64 },

    /// Viewport jitter.
    Shake {
        /// Maximum offset in pixels.
        amplitude: f32,
    },

    /// Burst of particles from a point.
    ParticleStream {
        origin: Point,
        count: u32,
        color: Rgba,
    },

    /// Falling glyph columns behind the text.
    AmbientRain {
        /// Fraction of columns carrying a drop.
        density: f32,
        color: Rgba,
    },

    /// A sigil burned over the dossier.
    SigilFlash { glyph: String, color: Rgba },
}

impl EffectKind {
    /// Short, stable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Flash { .. } => "flash",
            EffectKind::Glitch { .. } => "glitch",
            EffectKind::Pulse { .. } => "pulse",
            EffectKind::Shake { .. } => "shake",
            EffectKind::ParticleStream { .. } => "particle_stream",
            EffectKind::AmbientRain { .. } => "ambient_rain",
            EffectKind::SigilFlash { .. } => "sigil_flash",
        }
    }

    /// The colour parameter, for kinds that have one.
    pub fn color(&self) -> Option<Rgba> {
        match self {
            EffectKind::Flash { color }
            | EffectKind::Pulse { color, .. }
            | EffectKind::ParticleStream { color, .. }
            | EffectKind::AmbientRain { color, .. }
            | EffectKind::SigilFlash { color, .. } => Some(*color),
            EffectKind::Glitch { .. } | EffectKind::Shake { .. } => None,
        }
    }

    /// How this kind usually fades over its lifetime.
    pub fn default_fade(&self) -> FadeCurve {
        match self {
            EffectKind::Flash { .. } | EffectKind::SigilFlash { .. } => FadeCurve::FadeOut,
            EffectKind::Pulse { .. } => FadeCurve::Triangle,
            EffectKind::ParticleStream { .. } => FadeCurve::FadeOut,
            EffectKind::Glitch { .. } | EffectKind::Shake { .. } | EffectKind::AmbientRain { .. } => {
                FadeCurve::Constant
            }
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
