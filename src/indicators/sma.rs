// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the last `period` prices, maintained as a running sum:
//
//   sum_i = sum_{i-1} + price_i - price_{i-period}
//   SMA_i = sum_i / period
//
// O(n) total regardless of the period. Missing prices contribute 0 to the
// sum; they are not excluded from the window.
// =============================================================================

use crate::types::{absent, IndicatorSeries, PriceLike};

/// Compute the SMA series for `series` and look-back `period`.
///
/// The output is index-aligned with the input: the first `period - 1`
/// positions are `None`, every later position holds the windowed mean.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - `series.len() < period` => all `None`
pub fn calculate_sma<P: PriceLike>(series: &[P], period: usize) -> IndicatorSeries {
    if period == 0 || series.len() < period {
        return absent(series.len());
    }

    let period_f = period as f64;
    let mut result = absent(period - 1);
    result.reserve(series.len() - period + 1);

    let mut sum: f64 = series[..period].iter().map(PriceLike::price_or_zero).sum();
    result.push(Some(sum / period_f));

    for i in period..series.len() {
        sum += series[i].price_or_zero() - series[i - period].price_or_zero();
        result.push(Some(sum / period_f));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SeriesPoint;

    fn points(prices: &[f64]) -> Vec<SeriesPoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| SeriesPoint::new(i as i64 * 60_000, p))
            .collect()
    }

    /// O(n*p) reference used to check the running-sum version.
    fn brute_force(prices: &[f64], period: usize) -> Vec<Option<f64>> {
        (0..prices.len())
            .map(|i| {
                (i + 1 >= period)
                    .then(|| prices[i + 1 - period..=i].iter().sum::<f64>() / period as f64)
            })
            .collect()
    }

    #[test]
    fn sma_known_values() {
        let sma = calculate_sma(&points(&[100.0, 102.0, 101.0, 103.0, 99.0]), 3);
        assert_eq!(sma.len(), 5);
        assert!(sma[0].is_none() && sma[1].is_none());
        for (got, want) in sma[2..].iter().zip([101.0, 102.0, 101.0]) {
            assert!((got.unwrap() - want).abs() < 1e-10, "got {got:?}, expected {want}");
        }
    }

    #[test]
    fn sma_matches_brute_force() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 50.0 + (i as f64 * 0.7).sin() * 10.0 + i as f64 * 0.1)
            .collect();
        for period in 1..=20 {
            let fast = calculate_sma(&prices, period);
            let slow = brute_force(&prices, period);
            assert_eq!(fast.iter().take_while(|v| v.is_none()).count(), period - 1);
            for (a, b) in fast.iter().zip(slow.iter()) {
                match (a, b) {
                    (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9, "period {period}: {a} vs {b}"),
                    (None, None) => {}
                    _ => panic!("presence mismatch at period {period}"),
                }
            }
        }
    }

    #[test]
    fn sma_period_zero() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0], 0);
        assert_eq!(sma, vec![None, None, None]);
    }

    #[test]
    fn sma_insufficient_data() {
        assert_eq!(calculate_sma(&[1.0, 2.0], 5), vec![None, None]);
        assert!(calculate_sma::<f64>(&[], 3).is_empty());
    }

    #[test]
    fn sma_missing_price_counts_as_zero() {
        let sma = calculate_sma(&[Some(3.0), None, Some(3.0)], 3);
        assert!((sma[2].unwrap() - 2.0).abs() < 1e-10);
    }
}
