//! Dashboard roll-up over annotated milestones.

use esdash_core::{parse_optional_date, round_to, MilestoneRecord, MilestoneStatus, RiskLevel};
use serde::{Deserialize, Serialize};

/// Headline counts for the dashboard.
///
/// `behind_schedule` and `on_schedule` only count unfinished milestones, so
/// together with `completed` they need not add up to `total_milestones`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of milestones
    pub total_milestones: usize,
    /// Milestones at 100%
    pub completed: usize,
    /// Unfinished milestones with negative SV(t)
    pub behind_schedule: usize,
    /// Unfinished milestones with non-negative SV(t)
    pub on_schedule: usize,
    /// Mean SPI(t) over milestones that have one
    pub avg_spi_t: f64,
    /// High risk count
    pub high_risk: usize,
    /// Medium risk count
    pub medium_risk: usize,
    /// Low risk count
    pub low_risk: usize,
}

impl DashboardSummary {
    /// Summarize a set of annotated milestones.
    ///
    /// A missing SV(t) counts as zero, so an unscored unfinished milestone
    /// lands in `on_schedule`.
    pub fn from_milestones(milestones: &[MilestoneRecord]) -> Self {
        let mut summary = Self {
            total_milestones: milestones.len(),
            ..Default::default()
        };
        let mut spi_sum = 0.0;
        let mut spi_count = 0usize;

        for m in milestones {
            if m.is_fully_complete() {
                summary.completed += 1;
            } else if m.percent_complete < 100.0 {
                if m.sv_t.unwrap_or(0.0) < 0.0 {
                    summary.behind_schedule += 1;
                } else {
                    summary.on_schedule += 1;
                }
            }

            match m.risk {
                Some(RiskLevel::High) => summary.high_risk += 1,
                Some(RiskLevel::Medium) => summary.medium_risk += 1,
                Some(RiskLevel::Low) => summary.low_risk += 1,
                _ => {}
            }

            if let Some(spi) = m.spi_t {
                spi_sum += spi;
                spi_count += 1;
            }
        }

        if spi_count > 0 {
            summary.avg_spi_t = round_to(spi_sum / spi_count as f64, 2);
        }

        summary
    }
}

/// One row of the baseline-vs-forecast timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Milestone name
    pub name: String,
    /// Baseline finish, as supplied
    pub baseline: String,
    /// Forecast finish, or actual finish when there is no forecast
    pub forecast: String,
    /// SV(t) in days
    pub variance_days: Option<f64>,
    /// Milestone status
    pub status: Option<MilestoneStatus>,
    /// Milestone risk
    pub risk: Option<RiskLevel>,
}

impl TimelineEntry {
    /// Build a row, or `None` if the milestone lacks a parseable baseline
    /// finish or any projected finish.
    pub fn from_milestone(m: &MilestoneRecord) -> Option<Self> {
        let baseline = m.baseline_finish.as_deref()?;
        parse_optional_date(Some(baseline)).ok().flatten()?;
        let forecast = m.projected_finish()?;

        Some(Self {
            name: m.display_name().to_string(),
            baseline: baseline.to_string(),
            forecast: forecast.to_string(),
            variance_days: m.sv_t,
            status: m.status,
            risk: m.risk,
        })
    }
}

/// Everything the dashboard view needs in one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Headline counts
    pub summary: DashboardSummary,
    /// Baseline-vs-forecast rows
    pub timeline: Vec<TimelineEntry>,
    /// The annotated milestones themselves
    pub milestones: Vec<MilestoneRecord>,
}

impl DashboardData {
    /// Aggregate annotated milestones into a dashboard payload.
    pub fn from_milestones(milestones: Vec<MilestoneRecord>) -> Self {
        let summary = DashboardSummary::from_milestones(&milestones);
        let timeline = milestones
            .iter()
            .filter_map(TimelineEntry::from_milestone)
            .collect();

        Self {
            summary,
            timeline,
            milestones,
        }
    }
}
