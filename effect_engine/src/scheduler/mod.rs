//! The effect scheduler - registry of active effects and cycling selections.
//!
//! A frame works as follows:
//! 1. **Advance**: the frame loop calls [`EffectScheduler::advance`] with the current time
//! 2. **Sweep**: every effect whose lifetime has run out is dropped
//! 3. **Query**: the renderer reads [`EffectScheduler::all_active`] and friends
//!
//! Input handling may call [`EffectScheduler::start_effect`] and
//! [`EffectScheduler::advance_cycle`] at any point; new effects take `started_at`
//! from the latest `advance`.

mod cycle;

pub use cycle::*;

use std::collections::HashMap;
use tracing::{debug, trace};

use crate::clock::Millis;
use crate::effects::{Effect, EffectId, EffectKind};
use crate::error::{Result, SchedulerError};

/// Owns every active effect and cycling selection.
///
/// There is exactly one owner (the frame loop); callers keep keys, never
/// references into the registry across frames.
#[derive(Debug, Clone, Default)]
pub struct EffectScheduler {
    /// Time of the most recent `advance`.
    now: Millis,

    /// Active effects by key.
    effects: HashMap<String, Effect>,

    /// Cycling selections by key. Never expire.
    cycles: HashMap<String, CycleSelection>,
}

impl EffectScheduler {
    /// Create an empty scheduler at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scheduler whose clock already reads `now`.
    pub fn starting_at(now: Millis) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Time of the most recent `advance`.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Register an effect under `key`, replacing any effect already there.
    ///
    /// The effect starts at the scheduler's current time. A replaced effect's
    /// timing is discarded entirely.
    pub fn start_effect(
        &mut self,
        key: impl Into<String>,
        kind: EffectKind,
        duration: Millis,
    ) -> Result<EffectId> {
        let key = key.into();
        if key.is_empty() {
            return Err(SchedulerError::EmptyKey);
        }
        if duration == 0 {
            return Err(SchedulerError::ZeroDuration { key });
        }

        let effect = Effect::new(key.clone(), kind, self.now, duration);
        let id = effect.id();
        debug!(
            key = %key,
            kind = effect.kind().name(),
            started_at = self.now,
            duration,
            "effect started"
        );

        if let Some(previous) = self.effects.insert(key, effect) {
            trace!(key = previous.key(), "replaced running effect");
        }
        Ok(id)
    }

    /// Move the clock to `now` and drop every expired effect.
    ///
    /// `now` must not be smaller than in the previous call. That is not checked:
    /// a regressing clock only makes surviving effects look younger.
    pub fn advance(&mut self, now: Millis) {
        self.now = now;

        let before = self.effects.len();
        self.effects.retain(|_, effect| effect.is_active_at(now));

        let expired = before - self.effects.len();
        if expired > 0 {
            debug!(expired, now, remaining = self.effects.len(), "swept expired effects");
        }
    }

    /// Whether an effect is registered under `key` and still running.
    pub fn is_active(&self, key: &str) -> bool {
        self.effects
            .get(key)
            .is_some_and(|effect| effect.is_active_at(self.now))
    }

    /// Elapsed fraction (0.0 - 1.0) of the effect under `key`.
    pub fn progress(&self, key: &str) -> Option<f32> {
        self.effects.get(key).map(|effect| effect.progress_at(self.now))
    }

    /// Milliseconds left for the effect under `key`.
    pub fn remaining(&self, key: &str) -> Option<Millis> {
        self.effects.get(key).map(|effect| effect.remaining_at(self.now))
    }

    /// Look up the effect under `key`.
    pub fn get(&self, key: &str) -> Option<&Effect> {
        self.effects.get(key)
    }

    /// Every active effect. Iteration order is unspecified.
    pub fn all_active(&self) -> impl Iterator<Item = &Effect> {
        let now = self.now;
        self.effects.values().filter(move |effect| effect.is_active_at(now))
    }

    /// Number of registered effects.
    pub fn active_count(&self) -> usize {
        self.effects.len()
    }

    /// End an effect early.
    pub fn cancel(&mut self, key: &str) -> Option<Effect> {
        let removed = self.effects.remove(key);
        if removed.is_some() {
            debug!(key, "effect cancelled");
        }
        removed
    }

    /// Drop every effect. Cycling selections are kept.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    /// Step the selection `cycle_key` forward once over a list of `length`
    /// entries and return the new index.
    ///
    /// A selection that does not exist yet is created at 0 before stepping, so the
    /// first call returns 1 (or 0 when `length` is 1).
    pub fn advance_cycle(&mut self, cycle_key: &str, length: usize) -> Result<usize> {
        Self::check_cycle(cycle_key, length)?;

        let now = self.now;
        let index = self
            .cycles
            .entry(cycle_key.to_string())
            .or_insert_with(|| CycleSelection::new(now))
            .step(length, now);

        trace!(cycle = cycle_key, index, length, "cycle advanced");
        Ok(index)
    }

    /// Time-driven variant of [`advance_cycle`](Self::advance_cycle).
    ///
    /// The first call creates the selection at index 0. Afterwards the selection
    /// steps once whenever at least `interval` has passed since its last step.
    /// Skipped intervals are not caught up.
    pub fn advance_cycle_every(
        &mut self,
        cycle_key: &str,
        length: usize,
        interval: Millis,
    ) -> Result<usize> {
        Self::check_cycle(cycle_key, length)?;
        if interval == 0 {
            return Err(SchedulerError::ZeroInterval {
                key: cycle_key.to_string(),
            });
        }

        let now = self.now;
        let Some(selection) = self.cycles.get_mut(cycle_key) else {
            self.cycles
                .insert(cycle_key.to_string(), CycleSelection::new(now));
            return Ok(0);
        };

        if selection.is_due(now, interval) {
            let index = selection.step(length, now);
            trace!(cycle = cycle_key, index, length, "timed cycle advanced");
            Ok(index)
        } else {
            Ok(selection.fit(length))
        }
    }

    /// Current index of `cycle_key` without advancing; 0 if it was never created.
    pub fn current_cycle_index(&self, cycle_key: &str) -> usize {
        self.cycles
            .get(cycle_key)
            .map(CycleSelection::index)
            .unwrap_or(0)
    }

    /// Look up a cycling selection.
    pub fn cycle(&self, cycle_key: &str) -> Option<&CycleSelection> {
        self.cycles.get(cycle_key)
    }

    /// Forget a cycling selection so it starts over at 0.
    pub fn reset_cycle(&mut self, cycle_key: &str) -> Option<CycleSelection> {
        self.cycles.remove(cycle_key)
    }

    fn check_cycle(cycle_key: &str, length: usize) -> Result<()> {
        if cycle_key.is_empty() {
            return Err(SchedulerError::EmptyKey);
        }
        if length == 0 {
            return Err(SchedulerError::ZeroLength {
                key: cycle_key.to_string(),
            });
        }
        Ok(())
    }
}
