//! Shared configuration types for swingmeter
//!
//! This crate contains serializable configuration types that are shared between
//! the engine (swingmeter-core) and its front-ends.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum number of sessions kept in a character's history.
pub const MAX_HISTORY: usize = 50;

/// Seconds without a combat event before a replayed or tailed log leaves combat.
pub const DEFAULT_COMBAT_TIMEOUT_SECS: i64 = 60;

// ─────────────────────────────────────────────────────────────────────────────
// Meter Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// User configuration for the damage meter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterConfig {
    /// Directory holding one `<character>.json` record per character
    #[serde(default)]
    pub data_directory: String,
    /// Character whose record is loaded on startup
    #[serde(default = "default_character")]
    pub character: String,
    #[serde(default = "default_combat_timeout")]
    pub combat_timeout_secs: i64,
    /// Persist the character record after every reset
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            data_directory: String::new(),
            character: default_character(),
            combat_timeout_secs: default_combat_timeout(),
            autosave: true,
        }
    }
}

impl MeterConfig {
    pub fn with_data_directory(data_directory: String) -> Self {
        Self {
            data_directory,
            ..Default::default()
        }
    }
}

fn default_character() -> String {
    "default".to_string()
}

fn default_combat_timeout() -> i64 {
    DEFAULT_COMBAT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}
