// =============================================================================
// Shared types used across the analytics engine
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One indicator value per input point. `None` marks positions with
/// insufficient history or an undefined denominator.
pub type IndicatorSeries = Vec<Option<f64>>;

/// A single observation handed over by the data-retrieval layer.
///
/// Series are ordered ascending by `timestamp` (epoch millis) and carry no
/// duplicate timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl SeriesPoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            price,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Wall-clock time of the observation, `None` if the timestamp is out of
    /// chrono's range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Anything exposing a price field.
///
/// The moving averages are generic over this so they can run on raw
/// [`SeriesPoint`]s as well as on derived value sequences (the MACD signal
/// line is an EMA over the MACD line itself).
pub trait PriceLike {
    /// The price, or `None` when it is missing.
    fn price(&self) -> Option<f64>;

    /// The price with missing values counted as zero.
    ///
    /// Windowed sums use this: a missing price contributes 0 to the window
    /// rather than being excluded from it.
    fn price_or_zero(&self) -> f64 {
        self.price().unwrap_or(0.0)
    }
}

impl PriceLike for f64 {
    fn price(&self) -> Option<f64> {
        (!self.is_nan()).then_some(*self)
    }
}

impl PriceLike for Option<f64> {
    fn price(&self) -> Option<f64> {
        self.and_then(|p| p.price())
    }
}

impl PriceLike for SeriesPoint {
    fn price(&self) -> Option<f64> {
        self.price.price()
    }
}

/// An indicator series with every position absent.
pub(crate) fn absent(len: usize) -> IndicatorSeries {
    vec![None; len]
}
