// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the chart overlays.  Every
// function returns series index-aligned with its input, using `None` for
// positions with insufficient history, so callers can zip them by index.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{calculate_bollinger, BollingerBands};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, Macd};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
