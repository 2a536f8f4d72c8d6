//! Clock sources feeding the scheduler.

use std::cell::Cell;
use std::time::Instant;

/// Scheduler time in milliseconds.
pub type Millis = u64;

/// A source of non-decreasing timestamps.
///
/// Monotonicity is the implementor's obligation; the scheduler does not correct a
/// clock that runs backwards.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall-clock milliseconds since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        Millis::try_from(self.origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

/// A clock that only moves when told to. Used for replays and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    /// Create a manual clock at the given time.
    pub fn starting_at(now: Millis) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    /// Move forward by `delta` milliseconds and return the new time.
    pub fn advance_by(&self, delta: Millis) -> Millis {
        let next = self.now.get().saturating_add(delta);
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::starting_at(1000);
        assert_eq!(clock.now(), 1000);

        assert_eq!(clock.advance_by(500), 1500);
        assert_eq!(clock.now(), 1500);

        clock.set(42);
        assert_eq!(clock.now(), 42);
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::starting_at(Millis::MAX - 1);
        assert_eq!(clock.advance_by(10), Millis::MAX);
    }

    #[test]
    fn test_monotonic_clock_does_not_regress() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
