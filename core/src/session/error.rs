//! Error types for snapshot operations

use thiserror::Error;

/// Errors from saving, looking up or comparing snapshots.
/// Neither variant leaves any state changed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("a snapshot name is required")]
    EmptyName,

    #[error("snapshot '{name}' not found")]
    NotFound { name: String },
}
