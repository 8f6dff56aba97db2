use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use std::time::Instant;

use super::{MeleeCounters, SpellCounters};
use crate::combat::CombatTimer;
use crate::combat_log::CombatEvent;

/// Per-spell counters keyed by spell name.
pub type SpellBook = HashMap<String, SpellCounters>;

/// Counters for the session currently being played.
#[derive(Debug, Clone)]
pub struct LiveSession {
    pub started_at: Instant,
    pub started_wall: DateTime<Utc>,
    pub timer: CombatTimer,
    pub melee: MeleeCounters,
    pub spell: SpellCounters,
    pub spells: SpellBook,
}

impl LiveSession {
    pub fn new(started_at: Instant, started_wall: DateTime<Utc>) -> Self {
        Self {
            started_at,
            started_wall,
            timer: CombatTimer::new(),
            melee: MeleeCounters::default(),
            spell: SpellCounters::default(),
            spells: SpellBook::new(),
        }
    }

    /// Apply one classified event to the counters.
    pub fn apply_event(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::MeleeHit {
                damage,
                is_crit,
                is_glancing,
            } => self.melee.record_hit(*damage, *is_crit, *is_glancing),
            CombatEvent::MeleeAvoidance { kind } => self.melee.record_avoidance(*kind),
            CombatEvent::SpellDamage {
                spell_name,
                damage,
                is_crit,
                resisted,
            } => {
                self.spell.record_damage(*damage, *is_crit, *resisted);
                self.spell_entry(spell_name)
                    .record_damage(*damage, *is_crit, *resisted);
            }
            CombatEvent::SpellFailure { spell_name } => {
                self.spell.record_failure();
                self.spell_entry(spell_name).record_failure();
            }
        }
    }

    fn spell_entry(&mut self, spell_name: &str) -> &mut SpellCounters {
        self.spells.entry_ref(spell_name).or_default()
    }

    pub fn total_damage(&self) -> u64 {
        self.melee.damage + self.spell.damage
    }

    /// Zero every counter and restart the session at the given instants.
    /// An open combat interval is restarted at `now` rather than dropped.
    pub fn restart(&mut self, now: Instant, wall_now: DateTime<Utc>) {
        let was_in_combat = self.timer.in_combat();
        *self = LiveSession::new(now, wall_now);
        if was_in_combat {
            self.timer.enter(now);
        }
    }

    /// Spells sorted by damage dealt, highest first.
    pub fn spell_breakdown(&self) -> Vec<(&str, &SpellCounters)> {
        breakdown(&self.spells)
    }
}

pub(crate) fn breakdown(spells: &SpellBook) -> Vec<(&str, &SpellCounters)> {
    let mut rows: Vec<_> = spells.iter().map(|(k, v)| (k.as_str(), v)).collect();
    rows.sort_by(|a, b| b.1.damage.cmp(&a.1.damage).then_with(|| a.0.cmp(b.0)));
    rows
}
