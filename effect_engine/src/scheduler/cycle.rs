//! Cycling selections - rotating pointers into fixed-length content lists.

use serde::{Deserialize, Serialize};

use crate::clock::Millis;

/// Where we are in a named list. Wraps to 0 past the end and never terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSelection {
    index: usize,
    last_advanced_at: Millis,
}

impl CycleSelection {
    /// A selection at index 0, counted as advanced at `now`.
    pub fn new(now: Millis) -> Self {
        Self {
            index: 0,
            last_advanced_at: now,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn last_advanced_at(&self) -> Millis {
        self.last_advanced_at
    }

    /// Move one step forward modulo `length`. `length` must be positive.
    pub(crate) fn step(&mut self, length: usize, now: Millis) -> usize {
        self.index = (self.index + 1) % length;
        self.last_advanced_at = now;
        self.index
    }

    /// Pull the index back into range after the list shrank.
    pub(crate) fn fit(&mut self, length: usize) -> usize {
        self.index %= length;
        self.index
    }

    /// Whether at least `interval` has passed since the last step.
    pub(crate) fn is_due(&self, now: Millis, interval: Millis) -> bool {
        now.saturating_sub(self.last_advanced_at) >= interval
    }
}
