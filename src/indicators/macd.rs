// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd_line = EMA(short) - EMA(long)
//   signal    = EMA(signal) over the present MACD values only
//   histogram = macd_line - signal
//
// The signal EMA is computed over the compacted MACD line (absent positions
// dropped) and then spread back onto the original indices, so it is never
// seeded across a gap.
// =============================================================================

use super::ema::calculate_ema;
use crate::types::{absent, IndicatorSeries, PriceLike};

/// MACD line, signal line and histogram, each index-aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl Macd {
    fn absent(len: usize) -> Self {
        Self {
            line: absent(len),
            signal: absent(len),
            histogram: absent(len),
        }
    }
}

/// Calculate MACD with the given short, long and signal periods.
///
/// Returns all-absent lines when `series.len() < long`. The signal line is
/// entirely absent when fewer than `signal` MACD values exist.
pub fn calculate_macd<P: PriceLike>(series: &[P], short: usize, long: usize, signal: usize) -> Macd {
    if series.len() < long {
        return Macd::absent(series.len());
    }

    let ema_short = calculate_ema(series, short);
    let ema_long = calculate_ema(series, long);

    let line: IndicatorSeries = ema_short
        .iter()
        .zip(&ema_long)
        .map(|(s, l)| Some((*s)? - (*l)?))
        .collect();

    let signal_line = spread_signal(&line, signal);
    let histogram = line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    Macd {
        line,
        signal: signal_line,
        histogram,
    }
}

/// EMA over the present values of `line`, written back to the positions
/// those values came from.
fn spread_signal(line: &IndicatorSeries, period: usize) -> IndicatorSeries {
    let compacted: Vec<f64> = line.iter().flatten().copied().collect();
    if compacted.len() < period {
        return absent(line.len());
    }

    let mut signal_values = calculate_ema(&compacted, period).into_iter();
    line.iter()
        .map(|value| match value {
            Some(_) => signal_values.next().flatten(),
            None => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.4).sin() * 5.0 + i as f64 * 0.2).collect()
    }

    #[test]
    fn macd_insufficient_data() {
        let macd = calculate_macd(&wave(25), 12, 26, 9);
        assert_eq!(macd, Macd::absent(25));
    }

    #[test]
    fn macd_line_starts_at_long_period() {
        let macd = calculate_macd(&wave(60), 12, 26, 9);
        assert_eq!(macd.line.iter().take_while(|v| v.is_none()).count(), 25);
        assert!(macd.line[25..].iter().all(Option::is_some));
    }

    #[test]
    fn signal_waits_for_enough_macd_values() {
        let macd = calculate_macd(&wave(60), 12, 26, 9);
        // First MACD value at 25, ninth at 33.
        assert!(macd.signal[..33].iter().all(Option::is_none));
        assert!(macd.signal[33..].iter().all(Option::is_some));
    }

    #[test]
    fn signal_absent_when_macd_too_short() {
        // 30 points => 5 MACD values < 9.
        let macd = calculate_macd(&wave(30), 12, 26, 9);
        assert_eq!(macd.line.iter().flatten().count(), 5);
        assert!(macd.signal.iter().all(Option::is_none));
        assert!(macd.histogram.iter().all(Option::is_none));
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let macd = calculate_macd(&wave(120), 12, 26, 9);
        for i in 0..120 {
            match (macd.line[i], macd.signal[i], macd.histogram[i]) {
                (Some(m), Some(s), Some(h)) => assert_eq!(h, m - s),
                (_, None, None) => {}
                other => panic!("inconsistent histogram at {i}: {other:?}"),
            }
        }
    }

    #[test]
    fn signal_seed_is_mean_of_first_macd_values() {
        let macd = calculate_macd(&wave(60), 12, 26, 9);
        let first: f64 = macd.line[25..34].iter().flatten().sum::<f64>() / 9.0;
        assert!((macd.signal[33].unwrap() - first).abs() < 1e-10);
    }

    #[test]
    fn flat_series_has_zero_macd() {
        let macd = calculate_macd(&[50.0; 40], 12, 26, 9);
        for v in macd.line.iter().chain(&macd.histogram).flatten() {
            assert!(v.abs() < 1e-10);
        }
    }
}
