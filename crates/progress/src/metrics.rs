//! Earned Schedule metrics for one milestone.

use esdash_core::{days_between, MetricsError, MilestoneStatus, Time};

/// Raw (unrounded) Earned Schedule figures for a baselined milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMetrics {
    /// Days from project start to baseline finish
    pub planned_duration: i64,
    /// Actual time: days from project start to the status date
    pub at_days: i64,
    /// Earned schedule in days
    pub es_days: f64,
    /// ES - AT; positive is ahead of schedule
    pub sv_t: f64,
    /// ES / AT, or 1.0 when no time has elapsed
    pub spi_t: f64,
    /// Rate needed on the remaining work to hit the baseline finish
    pub tspi: f64,
    /// Status implied by the dates and progress
    pub status: MilestoneStatus,
}

impl ScheduleMetrics {
    /// Compute metrics as of `status_date`.
    ///
    /// Without an actual finish, earned schedule is interpolated linearly
    /// from percent complete across the planned duration.
    pub fn compute(
        project_start: Time,
        baseline_finish: Time,
        actual_finish: Option<Time>,
        percent_complete: f64,
        status_date: Time,
    ) -> Result<Self, MetricsError> {
        let planned_duration = days_between(project_start, baseline_finish);
        let at_days = days_between(project_start, status_date);

        let (es_days, status) = if let Some(finished) = actual_finish {
            (days_between(project_start, finished) as f64, MilestoneStatus::Complete)
        } else if percent_complete == 100.0 {
            (at_days as f64, MilestoneStatus::Complete)
        } else {
            let es = planned_duration as f64 * (percent_complete / 100.0);
            let status = if percent_complete > 0.0 {
                MilestoneStatus::InProgress
            } else {
                MilestoneStatus::NotStarted
            };
            (es, status)
        };
        let es_days = MetricsError::ensure_finite("es_days", es_days)?;

        let sv_t = es_days - at_days as f64;

        let spi_t = if at_days > 0 {
            es_days / at_days as f64
        } else {
            1.0
        };

        let remaining_planned = planned_duration as f64 - es_days;
        let remaining_time = days_between(status_date, baseline_finish);
        let tspi = if remaining_planned > 0.0 && remaining_time > 0 {
            remaining_planned / remaining_time as f64
        } else {
            1.0
        };

        Ok(Self {
            planned_duration,
            at_days,
            es_days,
            sv_t,
            spi_t: MetricsError::ensure_finite("spi_t", spi_t)?,
            tspi: MetricsError::ensure_finite("tspi", tspi)?,
            status,
        })
    }
}
