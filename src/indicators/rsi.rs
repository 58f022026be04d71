// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive prices.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A zero average loss yields exactly 100, flat markets included.
// =============================================================================

use crate::types::{absent, IndicatorSeries, PriceLike};

/// Compute the RSI series for `series` and `period`.
///
/// Index-aligned with the input. The first value appears at index `period`
/// (after `period` deltas have been seen); every earlier position is `None`.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - `series.len() <= period` => all `None` (need at least `period` deltas)
pub fn calculate_rsi<P: PriceLike>(series: &[P], period: usize) -> IndicatorSeries {
    if period == 0 || series.len() <= period {
        return absent(series.len());
    }

    // --- Compute price deltas ------------------------------------------------
    let deltas: Vec<f64> = series
        .windows(2)
        .map(|w| w[1].price_or_zero() - w[0].price_or_zero())
        .collect();

    // --- Seed averages with SMA of first `period` deltas ---------------------
    let (sum_gain, sum_loss) = deltas[..period].iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
        if d > 0.0 {
            (g + d, l)
        } else {
            (g, l - d)
        }
    });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    let mut result = absent(period);
    result.reserve(deltas.len() - period + 1);
    result.push(Some(rsi_from_averages(avg_gain, avg_loss)));

    // --- Wilder's smoothing for subsequent values ----------------------------
    for &delta in &deltas[period..] {
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        result.push(Some(rsi_from_averages(avg_gain, avg_loss)));
    }

    result
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
