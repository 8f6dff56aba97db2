//! Damage tracker facade.
//!
//! Owns the live session, the store of past sessions and the clock, and is the
//! single entry point for classifying lines, applying events, combat signals
//! and snapshot operations.

use std::time::Instant;

use crate::combat::CombatTimer;
use crate::combat_log::{CombatEvent, LineParser};
use crate::context::{Clock, SystemClock};
use crate::metrics::{LiveSession, MeleeCounters, SpellBook, SpellCounters};
use crate::session::{ComparisonReport, SessionStore, Snapshot, SnapshotError};


pub struct Tracker<C: Clock = SystemClock> {
    clock: C,
    parser: LineParser,
    live: LiveSession,
    store: SessionStore,
}

impl Default for Tracker<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Tracker<C> {
    pub fn new(clock: C) -> Self {
        Self::with_store(clock, SessionStore::new())
    }

    /// Start a fresh live session on top of previously recorded sessions.
    pub fn with_store(clock: C, store: SessionStore) -> Self {
        let live = LiveSession::new(clock.now(), clock.wall_now());
        Self {
            clock,
            parser: LineParser::new(),
            live,
            store,
        }
    }

    /// Give back the stored sessions, discarding the live session.
    pub fn into_store(self) -> SessionStore {
        self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    // --- Events ---

    pub fn classify_line(&self, line: &str) -> Option<CombatEvent> {
        self.parser.classify_line(line)
    }

    pub fn apply_event(&mut self, event: &CombatEvent) {
        self.live.apply_event(event);
    }

    /// Classify and apply one line. Unrecognized lines are ignored.
    pub fn process_line(&mut self, line: &str) -> Option<CombatEvent> {
        let event = self.parser.classify_line(line)?;
        self.live.apply_event(&event);
        Some(event)
    }

    // --- Combat ---

    pub fn enter_combat(&mut self) {
        let now = self.clock.now();
        self.enter_combat_at(now);
    }

    pub fn leave_combat(&mut self) {
        let now = self.clock.now();
        self.leave_combat_at(now);
    }

    pub fn enter_combat_at(&mut self, at: Instant) {
        if self.live.timer.enter(at) {
            tracing::debug!("entered combat");
        }
    }

    pub fn leave_combat_at(&mut self, at: Instant) {
        if let Some(seconds) = self.live.timer.leave(at) {
            tracing::debug!(seconds, "left combat");
        }
    }

    pub fn in_combat(&self) -> bool {
        self.live.timer.in_combat()
    }

    pub fn effective_combat_seconds(&self) -> f64 {
        self.live.timer.effective_seconds(self.clock.now())
    }

    pub fn combat_timer_mut(&mut self) -> &mut CombatTimer {
        &mut self.live.timer
    }

    // --- Snapshots ---

    pub fn freeze(&self) -> Snapshot {
        Snapshot::freeze(&self.live, self.clock.now(), self.clock.wall_now())
    }

    /// End the live session: freeze it, record it in history (when it dealt
    /// damage) and lifetime totals, then zero the live counters.
    pub fn reset(&mut self) -> Snapshot {
        let snapshot = self.freeze();
        let committed = self.store.record(&snapshot);
        self.live.restart(self.clock.now(), self.clock.wall_now());
        tracing::info!(
            committed,
            total_damage = snapshot.total_damage(),
            combat_seconds = snapshot.combat_seconds(),
            "session reset"
        );
        snapshot
    }

    /// Save the live session under `name`, replacing any earlier save.
    pub fn save_named(&mut self, name: &str) -> Result<(), SnapshotError> {
        if name.trim().is_empty() {
            return Err(SnapshotError::EmptyName);
        }
        let snapshot = self.freeze();
        self.store.named.save(name, snapshot)
    }

    pub fn delete_named(&mut self, name: &str) -> Result<Snapshot, SnapshotError> {
        self.store.named.remove(name)
    }

    pub fn compare(&self, a: &str, b: &str) -> Result<ComparisonReport, SnapshotError> {
        self.store.named.compare(a, b)
    }

    // --- Accessors ---

    pub fn live(&self) -> &LiveSession {
        &self.live
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn melee(&self) -> &MeleeCounters {
        &self.live.melee
    }

    pub fn spell(&self) -> &SpellCounters {
        &self.live.spell
    }

    pub fn spells(&self) -> &SpellBook {
        &self.live.spells
    }

    pub fn total_damage(&self) -> u64 {
        self.live.total_damage()
    }

    pub fn melee_hit_rate(&self) -> f64 {
        self.live.melee.hit_rate()
    }

    pub fn melee_crit_rate(&self) -> f64 {
        self.live.melee.crit_rate()
    }

    pub fn spell_hit_rate(&self) -> f64 {
        self.live.spell.hit_rate()
    }

    pub fn spell_crit_rate(&self) -> f64 {
        self.live.spell.crit_rate()
    }

    /// Live DPS over effective combat time.
    pub fn dps(&self) -> f64 {
        crate::session::dps(self.total_damage(), self.effective_combat_seconds())
    }
}
