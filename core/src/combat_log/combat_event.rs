use serde::{Deserialize, Serialize};

/// Outcome of a melee swing that dealt no damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvoidanceKind {
    Miss,
    Dodge,
    Parry,
    Block,
}

impl AvoidanceKind {
    pub fn label(&self) -> &'static str {
        match self {
            AvoidanceKind::Miss => "miss",
            AvoidanceKind::Dodge => "dodge",
            AvoidanceKind::Parry => "parry",
            AvoidanceKind::Block => "block",
        }
    }
}

/// A single self-inflicted combat action classified from a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    MeleeHit {
        damage: u64,
        is_crit: bool,
        is_glancing: bool,
    },
    MeleeAvoidance {
        kind: AvoidanceKind,
    },
    SpellDamage {
        spell_name: String,
        damage: u64,
        is_crit: bool,
        /// Damage the target resisted; 0 when there was no partial resist
        resisted: u64,
    },
    /// Full resist, immunity or any other cast that landed no damage
    SpellFailure {
        spell_name: String,
    },
}

impl CombatEvent {
    /// Damage actually applied by this event.
    pub fn damage(&self) -> u64 {
        match self {
            CombatEvent::MeleeHit { damage, .. } | CombatEvent::SpellDamage { damage, .. } => {
                *damage
            }
            CombatEvent::MeleeAvoidance { .. } | CombatEvent::SpellFailure { .. } => 0,
        }
    }

    pub fn spell_name(&self) -> Option<&str> {
        match self {
            CombatEvent::SpellDamage { spell_name, .. }
            | CombatEvent::SpellFailure { spell_name } => Some(spell_name),
            _ => None,
        }
    }
}
