use serde::{Deserialize, Serialize};

use super::Snapshot;
use super::snapshot::dps;
use crate::metrics::{MeleeCounters, SpellCounters};

/// Character-wide totals across every session. Only ever added to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifetimeTotals {
    pub melee: MeleeCounters,
    pub spell: SpellCounters,
    pub total_damage: u64,
    pub combat_seconds: f64,
    /// Sessions committed to history
    #[serde(default)]
    pub sessions: u64,
}

impl LifetimeTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every counter of `snapshot`.
    pub fn fold(&mut self, snapshot: &Snapshot) {
        self.melee.add(snapshot.melee());
        self.spell.add(snapshot.spell());
        self.total_damage += snapshot.total_damage();
        self.combat_seconds += snapshot.combat_seconds().max(0.0);
    }

    pub fn dps(&self) -> f64 {
        dps(self.total_damage, self.combat_seconds)
    }
}
