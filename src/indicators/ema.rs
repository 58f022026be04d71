// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = (price_t - EMA_{t-1}) * multiplier + EMA_{t-1}
//
// The very first EMA value, at index `period - 1`, is seeded with the SMA of
// the first `period` prices.
// =============================================================================

use crate::types::{absent, IndicatorSeries, PriceLike};

/// Compute the EMA series for `series` and look-back `period`.
///
/// Generic over [`PriceLike`] so it runs equally on raw points and on a
/// derived value sequence such as the MACD line.
///
/// The output is index-aligned with the input; the first `period - 1`
/// positions are `None`.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - `series.len() < period` => all `None`
pub fn calculate_ema<P: PriceLike>(series: &[P], period: usize) -> IndicatorSeries {
    if period == 0 || series.len() < period {
        return absent(series.len());
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let seed = series[..period].iter().map(PriceLike::price_or_zero).sum::<f64>() / period as f64;

    let mut result = absent(period - 1);
    result.reserve(series.len() - period + 1);
    result.push(Some(seed));

    let mut prev_ema = seed;
    for point in &series[period..] {
        let ema = (point.price_or_zero() - prev_ema) * multiplier + prev_ema;
        result.push(Some(ema));
        prev_ema = ema;
    }

    result
}
