use serde::{Deserialize, Serialize};

use super::{LifetimeTotals, NamedSnapshots, SessionHistory, Snapshot};

/// Everything kept about past sessions: bounded history, named snapshots and
/// lifetime totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStore {
    #[serde(default)]
    pub history: SessionHistory,
    #[serde(default)]
    pub named: NamedSnapshots,
    #[serde(default)]
    pub lifetime: LifetimeTotals,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished session: commit it to history when it dealt damage and
    /// fold it into the lifetime totals. Returns true if it entered history.
    pub fn record(&mut self, snapshot: &Snapshot) -> bool {
        if snapshot.is_empty() {
            return false;
        }

        let committed = snapshot.total_damage() > 0;
        self.lifetime.fold(snapshot);
        if committed {
            self.lifetime.sessions += 1;
            if let Some(evicted) = self.history.commit(snapshot.clone()) {
                tracing::info!(
                    evicted_at = %evicted.timestamp(),
                    "history full, dropped oldest session"
                );
            }
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::{AvoidanceKind, CombatEvent};
    use crate::metrics::LiveSession;
    use chrono::Utc;
    use std::time::Instant;

    fn freeze(events: &[CombatEvent]) -> Snapshot {
        let now = Instant::now();
        let mut live = LiveSession::new(now, Utc::now());
        for event in events {
            live.apply_event(event);
        }
        Snapshot::freeze(&live, now, Utc::now())
    }

    #[test]
    fn empty_snapshot_changes_nothing() {
        let mut store = SessionStore::new();
        assert!(!store.record(&freeze(&[])));
        assert_eq!(store, SessionStore::new());
    }

    #[test]
    fn damageless_session_folds_but_skips_history() {
        let mut store = SessionStore::new();
        let snapshot = freeze(&[CombatEvent::MeleeAvoidance {
            kind: AvoidanceKind::Miss,
        }]);

        assert!(!store.record(&snapshot));
        assert!(store.history.is_empty());
        assert_eq!(store.lifetime.melee.misses, 1);
        assert_eq!(store.lifetime.sessions, 0);
    }

    #[test]
    fn damaging_session_enters_history() {
        let mut store = SessionStore::new();
        let snapshot = freeze(&[CombatEvent::MeleeHit {
            damage: 42,
            is_crit: false,
            is_glancing: false,
        }]);

        assert!(store.record(&snapshot));
        assert_eq!(store.history.len(), 1);
        assert_eq!(store.lifetime.total_damage, 42);
        assert_eq!(store.lifetime.sessions, 1);
    }
}
