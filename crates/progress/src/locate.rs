//! Milestone listing for the import preview.

use esdash_core::{MilestoneId, MilestoneRecord};
use serde::{Deserialize, Serialize};

const NO_BASELINE: &str = "No baseline";
const NOT_SCHEDULED: &str = "Not scheduled";

/// Completion flag shown before any metrics are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionFlag {
    /// 100% complete
    Complete,
    /// Anything less
    #[serde(rename = "Not Complete")]
    NotComplete,
}

/// Preview row for one milestone found in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneInfo {
    /// Display name
    pub name: String,
    /// WBS code
    pub wbs: String,
    /// Source identifier
    pub id: Option<MilestoneId>,
    /// Baseline finish, or "No baseline"
    pub baseline_finish: String,
    /// Scheduled finish, or "Not scheduled"
    pub finish_date: String,
    /// Completion flag
    pub status: CompletionFlag,
    /// Percent complete
    pub percent_complete: f64,
}

impl From<&MilestoneRecord> for MilestoneInfo {
    fn from(m: &MilestoneRecord) -> Self {
        let status = if m.is_fully_complete() {
            CompletionFlag::Complete
        } else {
            CompletionFlag::NotComplete
        };

        Self {
            name: m.display_name().to_string(),
            wbs: m.wbs.clone(),
            id: m.id,
            baseline_finish: m.baseline_finish.clone().unwrap_or_else(|| NO_BASELINE.to_string()),
            finish_date: m.finish_date.clone().unwrap_or_else(|| NOT_SCHEDULED.to_string()),
            status,
            percent_complete: m.percent_complete,
        }
    }
}

/// List the milestones a source supplied, without scoring them.
pub fn locate_milestones(milestones: &[MilestoneRecord]) -> Vec<MilestoneInfo> {
    milestones.iter().map(MilestoneInfo::from).collect()
}
