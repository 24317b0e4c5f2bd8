//! Milestone record - the unit exchanged with the project-data source.

use serde::{Deserialize, Deserializer, Serialize};
use crate::id::MilestoneId;

/// Display name for records the source left unnamed.
pub const UNNAMED_MILESTONE: &str = "Unnamed Milestone";

/// A milestone as supplied by the project-data source, plus the Earned
/// Schedule fields derived from it.
///
/// Source fields are optional on input; missing ones take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRecord {
    /// Source identifier
    #[serde(default)]
    pub id: Option<MilestoneId>,

    /// Work breakdown structure code
    #[serde(default, deserialize_with = "null_as_default")]
    pub wbs: String,

    /// Milestone name
    #[serde(default)]
    pub name: Option<String>,

    /// Percent complete (0-100)
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent_complete: f64,

    /// Currently scheduled start
    #[serde(default)]
    pub start_date: Option<String>,

    /// Currently scheduled finish
    #[serde(default)]
    pub finish_date: Option<String>,

    /// Baseline start
    #[serde(default)]
    pub baseline_start: Option<String>,

    /// Baseline finish
    #[serde(default)]
    pub baseline_finish: Option<String>,

    /// Actual start
    #[serde(default)]
    pub actual_start: Option<String>,

    /// Actual finish; presence means the milestone is done
    #[serde(default)]
    pub actual_finish: Option<String>,

    /// Free-form notes
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,

    /// Schedule variance in days (positive = ahead)
    #[serde(default)]
    pub sv_t: Option<f64>,

    /// Schedule performance index
    #[serde(default)]
    pub spi_t: Option<f64>,

    /// To-complete schedule performance index
    #[serde(default)]
    pub tspi: Option<f64>,

    /// Projected finish
    #[serde(default)]
    pub forecast_finish: Option<String>,

    /// Derived status
    #[serde(default)]
    pub status: Option<MilestoneStatus>,

    /// Derived risk
    #[serde(default)]
    pub risk: Option<RiskLevel>,

    /// Set when metrics could not be computed for this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MilestoneRecord {
    /// Create a named record with no dates.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Name for display, falling back to [`UNNAMED_MILESTONE`].
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED_MILESTONE,
        }
    }

    /// Whether the source reports 100% complete.
    pub fn is_fully_complete(&self) -> bool {
        self.percent_complete == 100.0
    }

    /// Whether the source reports work left, i.e. under 100%.
    ///
    /// Anything at or above 100% has nothing left to project.
    pub fn has_remaining_work(&self) -> bool {
        self.percent_complete < 100.0
    }

    /// Whether an actual finish date was recorded.
    pub fn has_actual_finish(&self) -> bool {
        non_empty(&self.actual_finish).is_some()
    }

    /// Forecast finish if set, otherwise actual finish.
    pub fn projected_finish(&self) -> Option<&str> {
        non_empty(&self.forecast_finish).or_else(|| non_empty(&self.actual_finish))
    }

    /// Clear every derived field.
    pub fn clear_metrics(&mut self) {
        self.sv_t = None;
        self.spi_t = None;
        self.tspi = None;
        self.forecast_finish = None;
        self.status = None;
        self.risk = None;
        self.error = None;
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Milestone status derived from its dates and progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneStatus {
    /// No usable baseline finish; cannot be scored
    #[serde(rename = "No baseline")]
    NoBaseline,
    /// Zero percent complete
    #[serde(rename = "Not Started")]
    NotStarted,
    /// Partially complete
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished
    Complete,
}

impl MilestoneStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::NoBaseline => "No baseline",
            MilestoneStatus::NotStarted => "Not Started",
            MilestoneStatus::InProgress => "In Progress",
            MilestoneStatus::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schedule risk of an unfinished milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Finished; nothing left at risk
    None,
    /// Performing at or near plan
    Low,
    /// Slipping
    Medium,
    /// Badly behind or needs an unrealistic recovery rate
    High,
}

impl RiskLevel {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "None",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
