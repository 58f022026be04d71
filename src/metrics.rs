// =============================================================================
// Key statistics for the quote panel and dashboard cards
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::types::SeriesPoint;

/// Quote snapshot supplied with each series by the data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub symbol: String,
    pub currency: String,
    pub regular_market_price: f64,
    pub previous_close: f64,
    pub regular_market_open: f64,
    pub regular_market_day_high: f64,
    pub regular_market_day_low: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_market_volume: Option<f64>,
}

impl KeyMetrics {
    /// Previous close times the session volume, 0 when either is unusable.
    pub fn trading_value(&self) -> f64 {
        let value = self.previous_close * self.regular_market_volume.unwrap_or(0.0);
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// Whether the price is at or above the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Move of the last price against the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub change: f64,
    pub change_pct: f64,
    pub direction: Direction,
}

/// Change of `last_price` versus `previous_close`.
///
/// `None` when the previous close is zero or the result is not finite.
pub fn price_change(last_price: f64, previous_close: f64) -> Option<PriceChange> {
    if previous_close == 0.0 {
        return None;
    }

    let change = last_price - previous_close;
    let change_pct = change / previous_close * 100.0;
    if !change.is_finite() || !change_pct.is_finite() {
        return None;
    }

    let direction = if change >= 0.0 { Direction::Up } else { Direction::Down };
    Some(PriceChange {
        change,
        change_pct,
        direction,
    })
}

/// Price of the most recent observation.
pub fn last_price(series: &[SeriesPoint]) -> Option<f64> {
    series.last().map(|p| p.price)
}
