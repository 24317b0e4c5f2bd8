//! esdash core data models.
//!
//! This crate defines the milestone record exchanged with the project-data
//! source, the derived Earned Schedule fields the engine fills in, and the
//! canonical date handling shared by every other crate.

#![warn(missing_docs)]

// Core identities
mod id;

// Milestone records
mod milestone;
mod date;
mod error;

// Re-exports
pub use id::*;

pub use milestone::{MilestoneRecord, MilestoneStatus, RiskLevel, UNNAMED_MILESTONE};
pub use date::{
    parse_date, parse_optional_date, format_date, days_between, round_to,
    DateParseError, DATE_TIME_FORMAT, DATE_FORMAT,
};
pub use error::MetricsError;

/// Timestamp type.
///
/// Schedule dates come from the project file without a zone, so they are
/// kept naive end to end.
pub type Time = chrono::NaiveDateTime;
