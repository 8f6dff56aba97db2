use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{ComparisonReport, Snapshot, SnapshotError};

/// Snapshots saved under a user-chosen name, typically to compare gear sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedSnapshots {
    snapshots: HashMap<String, Snapshot>,
}

impl NamedSnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save or overwrite `name`. Surrounding whitespace is not part of the name.
    pub fn save(&mut self, name: &str, snapshot: Snapshot) -> Result<(), SnapshotError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SnapshotError::EmptyName);
        }
        let replaced = self.snapshots.insert(name.to_string(), snapshot).is_some();
        tracing::info!(name, replaced, "snapshot saved");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Snapshot, SnapshotError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SnapshotError::EmptyName);
        }
        self.snapshots.get(name).ok_or_else(|| SnapshotError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn remove(&mut self, name: &str) -> Result<Snapshot, SnapshotError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SnapshotError::EmptyName);
        }
        self.snapshots
            .remove(name)
            .ok_or_else(|| SnapshotError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshots.contains_key(name.trim())
    }

    /// Saved names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.snapshots.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Compare snapshot `b` against baseline `a`.
    pub fn compare(&self, a: &str, b: &str) -> Result<ComparisonReport, SnapshotError> {
        let base = self.get(a)?;
        let other = self.get(b)?;
        Ok(ComparisonReport::new(a.trim(), base, b.trim(), other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::CombatEvent;
    use crate::metrics::LiveSession;
    use chrono::Utc;
    use std::time::Instant;

    fn snapshot(damage: u64) -> Snapshot {
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
    fn save_rejects_empty_name() {
        let mut named = NamedSnapshots::new();
        assert_eq!(named.save("", snapshot(1)), Err(SnapshotError::EmptyName));
        assert_eq!(named.save("   ", snapshot(1)), Err(SnapshotError::EmptyName));
        assert!(named.is_empty());
    }

    #[test]
    fn save_overwrites_existing_name() {
        let mut named = NamedSnapshots::new();
        named.save("raid", snapshot(100)).unwrap();
        named.save(" raid ", snapshot(200)).unwrap();

        assert_eq!(named.len(), 1);
        assert_eq!(named.get("raid").unwrap().total_damage(), 200);
    }

    #[test]
    fn missing_names_are_not_found() {
        let mut named = NamedSnapshots::new();
        named.save("a", snapshot(1)).unwrap();

        assert_eq!(
            named.compare("a", "b").unwrap_err(),
            SnapshotError::NotFound {
                name: "b".to_string()
            }
        );
        assert_eq!(
            named.remove("zzz").unwrap_err(),
            SnapshotError::NotFound {
                name: "zzz".to_string()
            }
        );
        assert_eq!(named.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut named = NamedSnapshots::new();
        for name in ["tier2", "blues", "tier1"] {
            named.save(name, snapshot(1)).unwrap();
        }
        assert_eq!(named.names(), vec!["blues", "tier1", "tier2"]);
    }
}
