// =============================================================================
// Dashboard ranking by trading value
// =============================================================================
//
// Assets with a positive trading value come first, largest first.  Assets
// with zero, negative or unknown value follow in their original order.

use serde::{Deserialize, Serialize};

/// Anything that can be ranked on the dashboard.
pub trait TradingValue {
    /// Opaque trading value; `None` when unknown.
    fn trading_value(&self) -> Option<f64>;
}

/// Minimal per-asset summary used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub id: String,
    #[serde(default)]
    pub trading_value: Option<f64>,
}

impl TradingValue for AssetSummary {
    fn trading_value(&self) -> Option<f64> {
        self.trading_value
    }
}

/// Order `items` for presentation.
///
/// Stable: equal values keep their input order.
pub fn rank_by_trading_value<T: TradingValue>(items: Vec<T>) -> Vec<T> {
    let (mut ranked, unranked): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| item.trading_value().is_some_and(|v| v > 0.0));

    ranked.sort_by(|a, b| {
        let a = a.trading_value().unwrap_or_default();
        let b = b.trading_value().unwrap_or_default();
        b.total_cmp(&a)
    });

    ranked.extend(unranked);
    ranked
}
