use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use swingmeter_types::MAX_HISTORY;

use super::Snapshot;

/// Most recent sessions, oldest first, bounded to [`MAX_HISTORY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHistory {
    sessions: VecDeque<Snapshot>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot, evicting and returning the oldest one when full.
    pub fn commit(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        let evicted = if self.sessions.len() >= MAX_HISTORY {
            self.sessions.pop_front()
        } else {
            None
        };
        self.sessions.push_back(snapshot);
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.sessions.back()
    }

    /// Sessions in commit order, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Snapshot> + ExactSizeIterator {
        self.sessions.iter()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    /// Drop entries beyond the limit, e.g. after loading an older record.
    pub fn enforce_limit(&mut self) {
        while self.sessions.len() > MAX_HISTORY {
            self.sessions.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::CombatEvent;
    use crate::metrics::LiveSession;
    use chrono::Utc;
    use std::time::Instant;

    fn snapshot_with_damage(damage: u64) -> Snapshot {
        let now = Instant::now();
        let mut live = LiveSession::new(now, Utc::now());
        live.apply_event(&CombatEvent::MeleeHit {
            damage,
            is_crit: false,
            is_glancing: false,
        });
        Snapshot::freeze(&live, now, Utc::now())
    }

    #[test]
    fn commit_appends_in_order() {
        let mut history = SessionHistory::new();
        assert!(history.commit(snapshot_with_damage(1)).is_none());
        assert!(history.commit(snapshot_with_damage(2)).is_none());

        let damages: Vec<_> = history.iter().map(|s| s.total_damage()).collect();
        assert_eq!(damages, vec![1, 2]);
        assert_eq!(history.latest().map(|s| s.total_damage()), Some(2));
    }

    #[test]
    fn fifty_first_commit_evicts_oldest() {
        let mut history = SessionHistory::new();
        for damage in 1..=MAX_HISTORY as u64 {
            assert!(history.commit(snapshot_with_damage(damage)).is_none());
        }
        assert_eq!(history.len(), MAX_HISTORY);

        let evicted = history.commit(snapshot_with_damage(51));

        assert_eq!(evicted.map(|s| s.total_damage()), Some(1));
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.iter().next().map(|s| s.total_damage()), Some(2));
        assert_eq!(history.latest().map(|s| s.total_damage()), Some(51));
    }

    #[test]
    fn enforce_limit_trims_oldest() {
        let mut history = SessionHistory::new();
        for damage in 1..=(MAX_HISTORY as u64 + 3) {
            history.sessions.push_back(snapshot_with_damage(damage));
        }
        history.enforce_limit();
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.iter().next().map(|s| s.total_damage()), Some(4));
    }
}
