//! Inactivity-based combat detection for log files.
//!
//! A combat log carries no enter/leave combat markers, so when replaying or
//! tailing one the first classified event starts combat and a quiet gap of at
//! least the timeout ends it at the last activity.

use std::time::{Duration, Instant};

use super::CombatTimer;
use crate::context::DEFAULT_COMBAT_TIMEOUT_SECS;

#[derive(Debug, Clone)]
pub struct CombatDetector {
    timeout: Duration,
    last_activity: Option<Instant>,
}

impl CombatDetector {
    /// A timeout below one second would split every event into its own
    /// zero-length fight, so it falls back to the default.
    pub fn new(timeout_secs: i64) -> Self {
        let timeout_secs = if timeout_secs < 1 {
            DEFAULT_COMBAT_TIMEOUT_SECS
        } else {
            timeout_secs
        };
        Self {
            timeout: Duration::from_secs(timeout_secs as u64),
            last_activity: None,
        }
    }

    pub fn last_activity(&self) -> Option<Instant> {
        self.last_activity
    }

    /// Record a combat event at `at`, entering or splitting combat as needed.
    pub fn on_activity(&mut self, timer: &mut CombatTimer, at: Instant) {
        match self.last_activity {
            Some(last)
                if timer.in_combat() && at.saturating_duration_since(last) >= self.timeout =>
            {
                timer.leave(last);
                timer.enter(at);
            }
            _ => {
                timer.enter(at);
            }
        }
        // out-of-order timestamps never move activity backwards
        self.last_activity = Some(self.last_activity.map_or(at, |last| last.max(at)));
    }

    /// Leave combat if nothing happened for the timeout as of `now`.
    /// Returns true if combat was ended.
    pub fn check_idle(&mut self, timer: &mut CombatTimer, now: Instant) -> bool {
        let Some(last) = self.last_activity else {
            return false;
        };
        if timer.in_combat() && now.saturating_duration_since(last) >= self.timeout {
            timer.leave(last);
            self.last_activity = None;
            return true;
        }
        false
    }

    /// End of input: close any open interval at the last activity.
    pub fn finish(&mut self, timer: &mut CombatTimer) {
        if let Some(last) = self.last_activity.take() {
            timer.leave(last);
        }
    }
}
