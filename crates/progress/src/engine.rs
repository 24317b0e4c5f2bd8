//! The schedule metrics engine.

use chrono::{NaiveDate, NaiveDateTime};
use esdash_core::{
    format_date, parse_optional_date, round_to, MetricsError, MilestoneRecord,
    MilestoneStatus, RiskLevel, Time,
};
use tracing::{debug, error, info, warn};

use crate::dashboard::DashboardData;
use crate::forecast::{assess_risk, forecast_finish};
use crate::metrics::ScheduleMetrics;

/// Configuration for the metrics engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Project start assumed for milestones without a baseline start
    pub default_project_start: Time,
}

impl EngineConfig {
    /// Fallback project start: 2024-01-01 00:00:00.
    pub fn fallback_project_start() -> Time {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_project_start: Self::fallback_project_start(),
        }
    }
}

/// Result of scoring one milestone.
#[derive(Debug, Clone, PartialEq)]
pub enum MilestoneOutcome {
    /// All derived fields were computed
    Scored(MilestoneRecord),
    /// Computation stopped part way; fields set before the failure remain
    Failed {
        /// The partially annotated record
        record: MilestoneRecord,
        /// Why it failed
        reason: MetricsError,
    },
}

impl MilestoneOutcome {
    /// Whether scoring succeeded.
    pub fn is_scored(&self) -> bool {
        matches!(self, MilestoneOutcome::Scored(_))
    }

    /// Flatten into a record, recording any failure in its `error` field.
    pub fn into_record(self) -> MilestoneRecord {
        match self {
            MilestoneOutcome::Scored(record) => record,
            MilestoneOutcome::Failed { mut record, reason } => {
                record.error = Some(reason.to_string());
                record
            }
        }
    }
}

/// Stateless Earned Schedule calculator.
///
/// Every operation takes the status date explicitly; nothing is read from
/// the clock.
#[derive(Debug, Clone, Default)]
pub struct ScheduleMetricsEngine {
    config: EngineConfig,
}

impl ScheduleMetricsEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one milestone as of `status_date`.
    pub fn evaluate(&self, milestone: &MilestoneRecord, status_date: Time) -> MilestoneOutcome {
        let mut record = milestone.clone();
        record.clear_metrics();

        match self.annotate(&mut record, status_date) {
            Ok(()) => {
                debug!(
                    "Scored milestone {}: status={:?} risk={:?}",
                    record.display_name(),
                    record.status,
                    record.risk
                );
                MilestoneOutcome::Scored(record)
            }
            Err(reason) => {
                error!(
                    "Error calculating metrics for milestone {}: {}",
                    record.display_name(),
                    reason
                );
                MilestoneOutcome::Failed { record, reason }
            }
        }
    }

    /// Score one milestone, folding any failure into its `error` field.
    pub fn calculate_milestone_metrics(
        &self,
        milestone: &MilestoneRecord,
        status_date: Time,
    ) -> MilestoneRecord {
        self.evaluate(milestone, status_date).into_record()
    }

    /// Score every milestone independently, preserving input order.
    pub fn calculate_forecasts(
        &self,
        milestones: &[MilestoneRecord],
        status_date: Time,
    ) -> Vec<MilestoneRecord> {
        let outcomes: Vec<MilestoneOutcome> = milestones
            .iter()
            .map(|m| self.evaluate(m, status_date))
            .collect();

        let failed = outcomes.iter().filter(|o| !o.is_scored()).count();
        info!(
            "Calculated forecasts for {} milestones ({} failed) as of {}",
            outcomes.len(),
            failed,
            format_date(status_date)
        );

        outcomes.into_iter().map(MilestoneOutcome::into_record).collect()
    }

    /// Aggregate already-scored milestones for the dashboard.
    pub fn prepare_dashboard_data(&self, milestones: Vec<MilestoneRecord>) -> DashboardData {
        let data = DashboardData::from_milestones(milestones);
        info!(
            "Prepared dashboard: {} milestones, {} on timeline",
            data.summary.total_milestones,
            data.timeline.len()
        );
        data
    }

    fn annotate(&self, record: &mut MilestoneRecord, status_date: Time) -> Result<(), MetricsError> {
        let baseline_finish = parse_field(record, "baseline_finish", record.baseline_finish.as_deref());
        let actual_finish = parse_field(record, "actual_finish", record.actual_finish.as_deref());
        let remaining_work = record.has_remaining_work();
        let complete = actual_finish.is_some() || !remaining_work;

        let Some(baseline_finish) = baseline_finish else {
            record.status = Some(MilestoneStatus::NoBaseline);
            record.risk = Some(if complete { RiskLevel::None } else { RiskLevel::Low });
            return Ok(());
        };

        let project_start = parse_field(record, "baseline_start", record.baseline_start.as_deref())
            .unwrap_or(self.config.default_project_start);

        let metrics = ScheduleMetrics::compute(
            project_start,
            baseline_finish,
            actual_finish,
            record.percent_complete,
            status_date,
        )?;
        record.status = Some(metrics.status);

        let forecast = forecast_finish(&metrics, status_date, actual_finish, remaining_work)?;

        record.sv_t = Some(round_to(metrics.sv_t, 1));
        record.spi_t = Some(round_to(metrics.spi_t, 2));
        record.tspi = Some(round_to(metrics.tspi, 2));
        record.forecast_finish = forecast.map(format_date);
        record.risk = Some(assess_risk(complete, metrics.spi_t, metrics.tspi));

        Ok(())
    }
}

/// Parse a date field, logging and discarding values that don't parse.
fn parse_field(record: &MilestoneRecord, field: &str, value: Option<&str>) -> Option<Time> {
    match parse_optional_date(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Milestone {}: ignoring {}: {}", record.display_name(), field, e);
            None
        }
    }
}
