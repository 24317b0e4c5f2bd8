//! Milestone source trait abstraction.

use async_trait::async_trait;
use esdash_core::MilestoneRecord;

/// Error type for source operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while loading milestones.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Read-only access to the milestone records of a project.
///
/// Implementations return records in source order; the engine relies on
/// that order being stable.
#[async_trait]
pub trait MilestoneSource: Send + Sync {
    /// Load every milestone record.
    async fn load_milestones(&self) -> Result<Vec<MilestoneRecord>>;
}
