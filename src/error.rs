use thiserror::Error;

/// Caller errors raised by the engine.
///
/// Degenerate data (short series, zero average loss, non-positive base
/// price) is never an error; it surfaces as absent values instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("indicator '{indicator}' requires a positive period, got {period}")]
    InvalidPeriod {
        indicator: &'static str,
        period: usize,
    },

    #[error("no asset series available to chart")]
    NoSeries,
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
