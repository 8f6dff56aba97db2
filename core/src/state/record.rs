//! Per-character persistence of the session store.
//!
//! Each character's history, named snapshots and lifetime totals live in one
//! JSON file, `<data_dir>/<character>.json`. The live session is never
//! persisted; callers reset before saving.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::StoreError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub character: String,
    #[serde(flatten)]
    pub store: SessionStore,
}

impl CharacterRecord {
    pub fn new(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            store: SessionStore::new(),
        }
    }

    /// Path of the record file for `character` inside `dir`.
    pub fn path_for(dir: &Path, character: &str) -> Result<PathBuf, StoreError> {
        validate_character(character)?;
        Ok(dir.join(format!("{character}.json")))
    }

    /// Load a character's record. A missing file yields an empty record.
    pub fn load(dir: &Path, character: &str) -> Result<Self, StoreError> {
        let path = Self::path_for(dir, character)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no record on disk, starting fresh");
            return Ok(Self::new(character));
        }

        let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let mut record: CharacterRecord =
            serde_json::from_str(&content).map_err(|source| StoreError::Decode {
                path: path.clone(),
                source,
            })?;

        // A hand-edited file may hold more sessions than the history keeps
        record.store.history.enforce_limit();
        record.character = character.to_string();

        tracing::info!(
            character,
            sessions = record.store.history.len(),
            named = record.store.named.len(),
            "loaded character record"
        );
        Ok(record)
    }

    pub fn save(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        let path = Self::path_for(dir, &self.character)?;

        std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let content = serde_json::to_string_pretty(self).map_err(StoreError::Encode)?;
        std::fs::write(&path, content).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(character = %self.character, path = %path.display(), "saved character record");
        Ok(path)
    }
}

fn validate_character(name: &str) -> Result<(), StoreError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', ':']);
    if invalid {
        return Err(StoreError::InvalidCharacter {
            name: name.to_string(),
        });
    }
    Ok(())
}
