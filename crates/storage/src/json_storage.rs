//! JSON file milestone source.
//!
//! Accepts either a bare array of milestone records or an export object
//! with a `milestones` array.

use std::path::{Path, PathBuf};
use async_trait::async_trait;
use esdash_core::MilestoneRecord;
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};
use super::{MilestoneSource, StorageError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum MilestoneFile {
    List(Vec<MilestoneRecord>),
    Export { milestones: Vec<MilestoneRecord> },
}

impl MilestoneFile {
    fn into_records(self) -> Vec<MilestoneRecord> {
        match self {
            MilestoneFile::List(records) => records,
            MilestoneFile::Export { milestones } => milestones,
        }
    }
}

/// Milestone source backed by a JSON file.
pub struct JsonMilestoneSource {
    path: PathBuf,
}

impl JsonMilestoneSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse milestone records from JSON text.
    pub fn parse(content: &str) -> Result<Vec<MilestoneRecord>> {
        let file: MilestoneFile = serde_json::from_str(content)?;
        Ok(file.into_records())
    }
}

#[async_trait]
impl MilestoneSource for JsonMilestoneSource {
    async fn load_milestones(&self) -> Result<Vec<MilestoneRecord>> {
        if !fs::try_exists(&self.path).await? {
            return Err(StorageError::NotFound(self.path.display().to_string()));
        }

        debug!("Reading milestones from {}", self.path.display());
        let content = fs::read_to_string(&self.path).await?;
        let records = Self::parse(&content)?;

        info!("Loaded {} milestones from {}", records.len(), self.path.display());
        Ok(records)
    }
}
