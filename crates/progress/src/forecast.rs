//! Completion forecasting and risk rating.

use chrono::Duration;
use esdash_core::{MetricsError, RiskLevel, Time};
use crate::metrics::ScheduleMetrics;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// SPI(t) below this is high risk.
const HIGH_RISK_SPI: f64 = 0.85;
/// TSPI above this is high risk.
const HIGH_RISK_TSPI: f64 = 1.2;
/// SPI(t) below this is medium risk.
const MEDIUM_RISK_SPI: f64 = 0.95;
/// TSPI above this is medium risk.
const MEDIUM_RISK_TSPI: f64 = 1.1;

/// Project the finish date of a milestone.
///
/// Milestones under 100% with a positive SPI(t) are projected as
/// `status_date + (IEAC(t) - ES)` where `IEAC(t) = planned / SPI(t)`, even
/// when an actual finish is recorded. Everything else reports its actual
/// finish, if any.
pub fn forecast_finish(
    metrics: &ScheduleMetrics,
    status_date: Time,
    actual_finish: Option<Time>,
    remaining_work: bool,
) -> Result<Option<Time>, MetricsError> {
    if !remaining_work || metrics.spi_t <= 0.0 {
        return Ok(actual_finish);
    }

    let ieac_t = MetricsError::ensure_finite(
        "ieac_t",
        metrics.planned_duration as f64 / metrics.spi_t,
    )?;
    let remaining_days = ieac_t - metrics.es_days;

    let micros = (remaining_days * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(MetricsError::ForecastOutOfRange { days: remaining_days });
    }

    status_date
        .checked_add_signed(Duration::microseconds(micros as i64))
        .map(Some)
        .ok_or(MetricsError::ForecastOutOfRange { days: remaining_days })
}

/// Rate an unfinished milestone from its performance indices.
pub fn classify_risk(spi_t: f64, tspi: f64) -> RiskLevel {
    if spi_t < HIGH_RISK_SPI || tspi > HIGH_RISK_TSPI {
        RiskLevel::High
    } else if spi_t < MEDIUM_RISK_SPI || tspi > MEDIUM_RISK_TSPI {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Risk of a milestone; finished work carries none.
pub fn assess_risk(complete: bool, spi_t: f64, tspi: f64) -> RiskLevel {
    if complete {
        RiskLevel::None
    } else {
        classify_risk(spi_t, tspi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esdash_core::{format_date, parse_date, MilestoneStatus};

    fn date(s: &str) -> Time {
        parse_date(s).unwrap()
    }

    fn metrics(planned_duration: i64, es_days: f64, spi_t: f64) -> ScheduleMetrics {
        ScheduleMetrics {
            planned_duration,
            at_days: 0,
            es_days,
            sv_t: 0.0,
            spi_t,
            tspi: 1.0,
            status: MilestoneStatus::InProgress,
        }
    }

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(classify_risk(0.80, 1.0), RiskLevel::High);
        assert_eq!(classify_risk(0.90, 1.0), RiskLevel::Medium);
        assert_eq!(classify_risk(0.90, 1.1), RiskLevel::Medium);
        assert_eq!(classify_risk(0.98, 1.0), RiskLevel::Low);
        assert_eq!(classify_risk(1.0, 1.25), RiskLevel::High);
        assert_eq!(classify_risk(1.0, 1.15), RiskLevel::Medium);
    }

    #[test]
    fn test_risk_threshold_boundaries_are_exclusive() {
        assert_eq!(classify_risk(0.85, 1.0), RiskLevel::Medium);
        assert_eq!(classify_risk(1.0, 1.2), RiskLevel::Medium);
        assert_eq!(classify_risk(0.95, 1.1), RiskLevel::Low);
    }

    #[test]
    fn test_complete_has_no_risk() {
        assert_eq!(assess_risk(true, 0.1, 5.0), RiskLevel::None);
        assert_eq!(assess_risk(false, 0.1, 5.0), RiskLevel::High);
    }

    #[test]
    fn test_forecast_projects_from_spi() {
        // planned 60, SPI 0.75 -> IEAC 80, ES 30 -> 50 days left
        let m = metrics(60, 30.0, 0.75);
        let finish = forecast_finish(&m, date("2024-02-01"), None, true)
            .unwrap()
            .unwrap();
        assert_eq!(format_date(finish), "2024-03-22 00:00:00");
    }

    #[test]
    fn test_forecast_keeps_fractional_days() {
        // planned 10, SPI 0.8 -> IEAC 12.5, ES 2 -> 10.5 days left
        let m = metrics(10, 2.0, 0.8);
        let finish = forecast_finish(&m, date("2024-01-01"), None, true)
            .unwrap()
            .unwrap();
        assert_eq!(format_date(finish), "2024-01-11 12:00:00");
    }

    #[test]
    fn test_forecast_uses_actual_without_remaining_work() {
        let m = metrics(60, 30.0, 0.75);
        let actual = date("2024-02-20 10:00:00");
        assert_eq!(
            forecast_finish(&m, date("2024-03-01"), Some(actual), false).unwrap(),
            Some(actual)
        );
        assert_eq!(forecast_finish(&m, date("2024-03-01"), None, false).unwrap(), None);
    }

    #[test]
    fn test_forecast_projects_despite_actual_finish() {
        let m = metrics(60, 30.0, 0.75);
        let actual = date("2024-02-20 10:00:00");
        let finish = forecast_finish(&m, date("2024-02-01"), Some(actual), true)
            .unwrap()
            .unwrap();
        assert_eq!(format_date(finish), "2024-03-22 00:00:00");
    }

    #[test]
    fn test_forecast_absent_without_positive_spi() {
        let m = metrics(60, 0.0, 0.0);
        assert_eq!(forecast_finish(&m, date("2024-02-01"), None, true).unwrap(), None);
    }

    #[test]
    fn test_forecast_out_of_range() {
        let m = metrics(60, 1.0e-9, 1.0e-12);
        let err = forecast_finish(&m, date("2024-02-01"), None, true).unwrap_err();
        assert!(matches!(err, MetricsError::ForecastOutOfRange { .. }));
    }
}
