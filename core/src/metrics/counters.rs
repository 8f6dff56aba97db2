use serde::{Deserialize, Serialize};

use crate::combat_log::AvoidanceKind;

/// Percentage of `part` in `whole`, 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Auto-attack outcomes and damage.
///
/// Glancing blows are a subtype of hits: every glancing blow is also counted
/// in `hits`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeCounters {
    pub hits: u64,
    pub crits: u64,
    pub misses: u64,
    pub dodges: u64,
    pub parries: u64,
    pub blocks: u64,
    pub glancing_hits: u64,
    pub damage: u64,
    pub crit_damage: u64,
}

impl MeleeCounters {
    pub fn record_hit(&mut self, damage: u64, is_crit: bool, is_glancing: bool) {
        self.damage += damage;
        if is_crit {
            self.crits += 1;
            self.crit_damage += damage;
        } else if is_glancing {
            self.glancing_hits += 1;
            self.hits += 1;
        } else {
            self.hits += 1;
        }
    }

    pub fn record_avoidance(&mut self, kind: AvoidanceKind) {
        match kind {
            AvoidanceKind::Miss => self.misses += 1,
            AvoidanceKind::Dodge => self.dodges += 1,
            AvoidanceKind::Parry => self.parries += 1,
            AvoidanceKind::Block => self.blocks += 1,
        }
    }

    /// Misses, dodges, parries and blocks pooled.
    pub fn avoided(&self) -> u64 {
        self.misses + self.dodges + self.parries + self.blocks
    }

    pub fn landed(&self) -> u64 {
        self.hits + self.crits
    }

    pub fn swings(&self) -> u64 {
        self.landed() + self.avoided()
    }

    pub fn hit_rate(&self) -> f64 {
        percent(self.landed(), self.swings())
    }

    pub fn crit_rate(&self) -> f64 {
        percent(self.crits, self.landed())
    }

    pub fn glancing_rate(&self) -> f64 {
        percent(self.glancing_hits, self.landed())
    }

    /// Average damage of a landed swing.
    pub fn average_hit(&self) -> f64 {
        match self.landed() {
            0 => 0.0,
            n => self.damage as f64 / n as f64,
        }
    }

    pub fn add(&mut self, other: &MeleeCounters) {
        self.hits += other.hits;
        self.crits += other.crits;
        self.misses += other.misses;
        self.dodges += other.dodges;
        self.parries += other.parries;
        self.blocks += other.blocks;
        self.glancing_hits += other.glancing_hits;
        self.damage += other.damage;
        self.crit_damage += other.crit_damage;
    }
}

/// Spell outcomes and damage, used both in aggregate and per spell.
///
/// `damage` only counts damage applied; resisted damage is tracked in
/// `resisted_damage` and never subtracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCounters {
    pub hits: u64,
    pub crits: u64,
    pub full_resists: u64,
    pub partial_resists: u64,
    pub damage: u64,
    pub crit_damage: u64,
    pub resisted_damage: u64,
}

impl SpellCounters {
    pub fn record_damage(&mut self, damage: u64, is_crit: bool, resisted: u64) {
        self.damage += damage;
        if is_crit {
            self.crits += 1;
            self.crit_damage += damage;
        } else {
            self.hits += 1;
        }
        if resisted > 0 {
            self.partial_resists += 1;
            self.resisted_damage += resisted;
        }
    }

    pub fn record_failure(&mut self) {
        self.full_resists += 1;
    }

    pub fn landed(&self) -> u64 {
        self.hits + self.crits
    }

    pub fn casts(&self) -> u64 {
        self.landed() + self.full_resists
    }

    /// Partial resists count as hits since damage was dealt.
    pub fn hit_rate(&self) -> f64 {
        percent(self.landed(), self.casts())
    }

    pub fn crit_rate(&self) -> f64 {
        percent(self.crits, self.landed())
    }

    pub fn average_hit(&self) -> f64 {
        match self.landed() {
            0 => 0.0,
            n => self.damage as f64 / n as f64,
        }
    }

    pub fn add(&mut self, other: &SpellCounters) {
        self.hits += other.hits;
        self.crits += other.crits;
        self.full_resists += other.full_resists;
        self.partial_resists += other.partial_resists;
        self.damage += other.damage;
        self.crit_damage += other.crit_damage;
        self.resisted_damage += other.resisted_damage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_zero_without_events() {
        let melee = MeleeCounters::default();
        assert_eq!(melee.hit_rate(), 0.0);
        assert_eq!(melee.crit_rate(), 0.0);
        assert_eq!(melee.average_hit(), 0.0);

        let spell = SpellCounters::default();
        assert_eq!(spell.hit_rate(), 0.0);
        assert_eq!(spell.crit_rate(), 0.0);
    }

    #[test]
    fn melee_hit_rate_pools_avoidance() {
        let mut melee = MeleeCounters::default();
        melee.record_hit(100, false, false);
        melee.record_hit(200, true, false);
        melee.record_avoidance(AvoidanceKind::Miss);
        melee.record_avoidance(AvoidanceKind::Dodge);
        melee.record_avoidance(AvoidanceKind::Parry);
        melee.record_avoidance(AvoidanceKind::Block);

        // 2 landed of 6 swings
        assert!((melee.hit_rate() - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(melee.crit_rate(), 50.0);
        assert_eq!(melee.average_hit(), 150.0);
    }

    #[test]
    fn glancing_counts_as_hit() {
        let mut melee = MeleeCounters::default();
        melee.record_hit(60, false, true);
        assert_eq!(melee.hits, 1);
        assert_eq!(melee.glancing_hits, 1);
        assert_eq!(melee.crits, 0);
        assert_eq!(melee.damage, 60);
        assert!(melee.landed() + melee.avoided() >= melee.glancing_hits);
    }

    #[test]
    fn spell_hit_rate_ignores_partial_resists() {
        let mut spell = SpellCounters::default();
        spell.record_damage(300, false, 100);
        spell.record_damage(600, true, 0);
        spell.record_failure();

        assert_eq!(spell.partial_resists, 1);
        assert_eq!(spell.resisted_damage, 100);
        assert_eq!(spell.damage, 900);
        assert!((spell.hit_rate() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(spell.crit_rate(), 50.0);
    }

    #[test]
    fn add_sums_every_field() {
        let mut a = SpellCounters::default();
        a.record_damage(10, false, 5);
        let mut b = a;
        b.add(&a);
        assert_eq!(b.hits, 2);
        assert_eq!(b.damage, 20);
        assert_eq!(b.resisted_damage, 10);
        assert_eq!(b.partial_resists, 2);
    }
}
