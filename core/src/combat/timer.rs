use std::time::Instant;

/// Two-state combat clock that accumulates time spent in combat.
///
/// `combat_start` is `Some` exactly while in combat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatTimer {
    combat_start: Option<Instant>,
    accumulated_seconds: f64,
}

impl CombatTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_combat(&self) -> bool {
        self.combat_start.is_some()
    }

    pub fn combat_start(&self) -> Option<Instant> {
        self.combat_start
    }

    /// Seconds from completed combat intervals only.
    pub fn accumulated_seconds(&self) -> f64 {
        self.accumulated_seconds
    }

    /// Returns true if this call started a combat interval.
    pub fn enter(&mut self, now: Instant) -> bool {
        if self.combat_start.is_some() {
            return false;
        }
        self.combat_start = Some(now);
        true
    }

    /// Close the open interval. Returns its length in seconds, or `None` when
    /// already out of combat.
    pub fn leave(&mut self, now: Instant) -> Option<f64> {
        let start = self.combat_start.take()?;
        let interval = now.saturating_duration_since(start).as_secs_f64();
        self.accumulated_seconds += interval;
        Some(interval)
    }

    /// Accumulated seconds plus the currently open interval, without closing it.
    pub fn effective_seconds(&self, now: Instant) -> f64 {
        let open = self
            .combat_start
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0);
        self.accumulated_seconds + open
    }
}
