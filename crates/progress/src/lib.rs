//! Schedule progress (Earned Schedule)
//!
//! Per-milestone schedule metrics, completion forecasts, risk rating and
//! the dashboard roll-up.

#![warn(missing_docs)]

pub mod engine;
pub mod metrics;
pub mod forecast;
pub mod dashboard;
pub mod locate;

pub use engine::{ScheduleMetricsEngine, EngineConfig, MilestoneOutcome};
pub use metrics::ScheduleMetrics;
pub use forecast::{classify_risk, assess_risk, forecast_finish};
pub use dashboard::{DashboardData, DashboardSummary, TimelineEntry};
pub use locate::{locate_milestones, MilestoneInfo, CompletionFlag};
