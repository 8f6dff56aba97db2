//! Time sources
//!
//! Combat durations are measured on a monotonic clock; snapshot timestamps use
//! wall-clock UTC time.

use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic instant used for duration math.
    fn now(&self) -> Instant;
    /// Wall-clock time used for snapshot timestamps.
    fn wall_now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Wall time advances in step with the
/// monotonic instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    wall_origin: DateTime<Utc>,
    offset: Cell<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(wall_origin: DateTime<Utc>) -> Self {
        Self {
            origin: Instant::now(),
            wall_origin,
            offset: Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }

    fn wall_now(&self) -> DateTime<Utc> {
        let offset = chrono::Duration::from_std(self.offset.get()).unwrap_or_default();
        self.wall_origin + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_both_sources_together() {
        let clock = ManualClock::new();
        let start = clock.now();
        let wall_start = clock.wall_now();

        clock.advance_secs(90);

        assert_eq!(clock.now() - start, Duration::from_secs(90));
        assert_eq!((clock.wall_now() - wall_start).num_seconds(), 90);
    }
}
