//! Per-milestone computation errors.

/// Errors raised while deriving metrics for a single milestone.
///
/// These never abort a batch; the engine attaches them to the record that
/// produced them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// An intermediate value was NaN or infinite
    #[error("non-finite {quantity}: {value}")]
    NonFinite {
        /// Name of the quantity
        quantity: &'static str,
        /// Offending value
        value: f64,
    },

    /// Projected finish falls outside the representable date range
    #[error("forecast finish out of range: {days:.1} days from status date")]
    ForecastOutOfRange {
        /// Remaining duration that overflowed
        days: f64,
    },
}

impl MetricsError {
    /// Check that `value` is finite, naming it in the error otherwise.
    pub fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { quantity, value })
        }
    }
}
