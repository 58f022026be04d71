// =============================================================================
// Fan-out / fan-in orchestration helpers
// =============================================================================
//
// Per-asset work (loading a series, computing its chart) runs as independent
// units.  A failed unit is logged and reported; it never invalidates the
// others.  Once the units settle, the chart dispatcher picks the
// single-asset or the multi-asset path.

use std::fmt::Display;
use std::future::Future;

use futures_util::future::join_all;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::annotate::{annotate, AnnotatedPoint, Indicator};
use crate::config::IndicatorParams;
use crate::error::{AnalyticsError, Result};
use crate::metrics::{last_price, price_change, KeyMetrics, PriceChange};
use crate::normalize::{merge_normalized, MergedPoint};
use crate::ranking::{rank_by_trading_value, TradingValue};
use crate::types::SeriesPoint;

// ---------------------------------------------------------------------------
// Settling concurrent per-asset units
// ---------------------------------------------------------------------------

/// Outcome of a batch of per-asset units.
#[derive(Debug)]
pub struct Settled<T> {
    /// Successful units in submission order.
    pub loaded: IndexMap<String, T>,
    /// Failed units with their error message, in submission order.
    pub failed: Vec<(String, String)>,
}

/// Await every unit concurrently and partition the results.
pub async fn settle_all<T, E, F>(jobs: Vec<(String, F)>) -> Settled<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let (ids, futures): (Vec<String>, Vec<F>) = jobs.into_iter().unzip();
    let outcomes = join_all(futures).await;

    let mut loaded = IndexMap::with_capacity(ids.len());
    let mut failed = Vec::new();
    for (id, outcome) in ids.into_iter().zip(outcomes) {
        match outcome {
            Ok(value) => {
                loaded.insert(id, value);
            }
            Err(e) => {
                warn!(asset = %id, error = %e, "asset unit failed");
                failed.push((id, e.to_string()));
            }
        }
    }

    info!(loaded = loaded.len(), failed = failed.len(), "asset units settled");
    Settled { loaded, failed }
}

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Chart-ready output for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartView {
    /// One asset in raw prices, with overlays.
    Single {
        asset: String,
        points: Vec<AnnotatedPoint>,
    },
    /// Several assets rebased to 100 on a shared timeline.
    Comparison {
        assets: Vec<String>,
        points: Vec<MergedPoint>,
    },
}

/// Build the chart for whatever assets loaded successfully.
///
/// Overlays apply only to a single asset; with several assets the
/// selection is ignored and the series are merged instead.
pub fn build_chart(
    loaded: &IndexMap<String, Vec<SeriesPoint>>,
    selected: &[Indicator],
    params: &IndicatorParams,
) -> Result<ChartView> {
    match loaded.len() {
        0 => Err(AnalyticsError::NoSeries),
        1 => {
            let (asset, series) = loaded.first().ok_or(AnalyticsError::NoSeries)?;
            Ok(ChartView::Single {
                asset: asset.clone(),
                points: annotate(series, selected, params)?,
            })
        }
        n => {
            if !selected.is_empty() {
                debug!(assets = n, "overlays ignored for multi-asset comparison");
            }
            Ok(ChartView::Comparison {
                assets: loaded.keys().cloned().collect(),
                points: merge_normalized(loaded),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Everything the dashboard knows about one asset.
#[derive(Debug, Clone)]
pub struct DashboardEntry {
    pub id: String,
    pub name: String,
    pub metrics: KeyMetrics,
    pub series: Vec<SeriesPoint>,
}

impl TradingValue for DashboardEntry {
    fn trading_value(&self) -> Option<f64> {
        Some(self.metrics.trading_value())
    }
}

/// One dashboard card, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCard {
    pub id: String,
    pub name: String,
    pub trading_value: f64,
    pub last_price: Option<f64>,
    pub change: Option<PriceChange>,
    pub currency: String,
}

/// Rank entries by trading value and derive each card's headline numbers.
pub fn build_dashboard(entries: Vec<DashboardEntry>) -> Vec<DashboardCard> {
    rank_by_trading_value(entries)
        .into_iter()
        .map(|entry| {
            let last = last_price(&entry.series);
            DashboardCard {
                trading_value: entry.metrics.trading_value(),
                change: last.and_then(|p| price_change(p, entry.metrics.previous_close)),
                last_price: last,
                currency: entry.metrics.currency,
                id: entry.id,
                name: entry.name,
            }
        })
        .collect()
}
