use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::metrics::{LiveSession, MeleeCounters, SpellBook, SpellCounters, breakdown};

/// Frozen copy of a session's counters at a point in time.
///
/// A snapshot owns deep copies of everything it reports and offers no way to
/// mutate them after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    timestamp: DateTime<Utc>,
    combat_seconds: f64,
    total_damage: u64,
    dps: f64,
    melee: MeleeCounters,
    spell: SpellCounters,
    spells: SpellBook,
}

impl Snapshot {
    /// Freeze `live` as of `now`. An open combat interval is counted up to
    /// `now` without being closed.
    pub fn freeze(live: &LiveSession, now: Instant, wall_now: DateTime<Utc>) -> Self {
        let combat_seconds = live.timer.effective_seconds(now);
        let total_damage = live.total_damage();
        Self {
            timestamp: wall_now,
            combat_seconds,
            total_damage,
            dps: dps(total_damage, combat_seconds),
            melee: live.melee,
            spell: live.spell,
            spells: live.spells.clone(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn combat_seconds(&self) -> f64 {
        self.combat_seconds
    }

    pub fn total_damage(&self) -> u64 {
        self.total_damage
    }

    pub fn dps(&self) -> f64 {
        self.dps
    }

    pub fn melee(&self) -> &MeleeCounters {
        &self.melee
    }

    pub fn spell(&self) -> &SpellCounters {
        &self.spell
    }

    pub fn spells(&self) -> &SpellBook {
        &self.spells
    }

    pub fn spell_breakdown(&self) -> Vec<(&str, &SpellCounters)> {
        breakdown(&self.spells)
    }

    /// True if no combat event was recorded. Time spent idle in combat does
    /// not count.
    pub fn is_empty(&self) -> bool {
        self.total_damage == 0
            && self.melee == MeleeCounters::default()
            && self.spell == SpellCounters::default()
    }
}

/// Damage per second of combat, 0 when no combat time was recorded.
pub fn dps(total_damage: u64, combat_seconds: f64) -> f64 {
    if combat_seconds > 0.0 {
        total_damage as f64 / combat_seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::CombatEvent;
    use std::time::Duration;

    fn busy_session(start: Instant) -> LiveSession {
        let mut live = LiveSession::new(start, Utc::now());
        live.timer.enter(start);
        live.apply_event(&CombatEvent::MeleeHit {
            damage: 150,
            is_crit: true,
            is_glancing: false,
        });
        live.apply_event(&CombatEvent::SpellDamage {
            spell_name: "Fireball".to_string(),
            damage: 450,
            is_crit: false,
            resisted: 30,
        });
        live
    }

    #[test]
    fn freeze_copies_live_counters() {
        let start = Instant::now();
        let live = busy_session(start);
        let snapshot = Snapshot::freeze(&live, start + Duration::from_secs(10), Utc::now());

        assert_eq!(snapshot.melee(), &live.melee);
        assert_eq!(snapshot.spell(), &live.spell);
        assert_eq!(snapshot.spells(), &live.spells);
        assert_eq!(snapshot.total_damage(), 600);
        assert_eq!(snapshot.combat_seconds(), 10.0);
        assert_eq!(snapshot.dps(), 60.0);
        // freezing does not close combat
        assert!(live.timer.in_combat());
    }

    #[test]
    fn freeze_is_isolated_from_later_mutation() {
        let start = Instant::now();
        let mut live = busy_session(start);
        let snapshot = Snapshot::freeze(&live, start, Utc::now());
        let frozen = snapshot.clone();

        live.apply_event(&CombatEvent::SpellDamage {
            spell_name: "Fireball".to_string(),
            damage: 999,
            is_crit: true,
            resisted: 0,
        });
        live.apply_event(&CombatEvent::SpellFailure {
            spell_name: "Frostbolt".to_string(),
        });

        assert_eq!(snapshot, frozen);
        assert_eq!(snapshot.spells().len(), 1);
        assert_eq!(snapshot.spells()["Fireball"].damage, 450);
    }

    #[test]
    fn dps_is_zero_without_combat_time() {
        let start = Instant::now();
        let mut live = LiveSession::new(start, Utc::now());
        live.apply_event(&CombatEvent::MeleeHit {
            damage: 10,
            is_crit: false,
            is_glancing: false,
        });
        let snapshot = Snapshot::freeze(&live, start, Utc::now());
        assert_eq!(snapshot.dps(), 0.0);
        assert_eq!(snapshot.total_damage(), 10);
    }
}
