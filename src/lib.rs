// =============================================================================
// Commodity Analytics — time-series engine behind the price dashboard
// =============================================================================
//
// Turns raw price/volume series into chart-ready data:
// - technical overlays for a single asset (SMA, EMA, RSI, Bollinger, MACD)
// - a merged, rebased timeline for comparing several assets
// - trading-value ordering for the dashboard grid
//
// Everything here is a pure function of its inputs.  Nothing is cached and
// every call recomputes from the full series.
// =============================================================================

pub mod annotate;
pub mod config;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod types;

pub use annotate::{annotate, AnnotatedPoint, Indicator};
pub use config::{EngineConfig, IndicatorParams, TimeRange};
pub use error::AnalyticsError;
pub use normalize::{merge_normalized, MergedPoint};
pub use pipeline::{build_chart, build_dashboard, settle_all, ChartView, DashboardCard, DashboardEntry, Settled};
pub use ranking::{rank_by_trading_value, AssetSummary, TradingValue};
pub use types::{IndicatorSeries, PriceLike, SeriesPoint};
