// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the same trailing window the SMA averages over.

use super::sma::calculate_sma;
use crate::types::{absent, IndicatorSeries, PriceLike};

/// The three bands, each index-aligned with the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub middle: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BollingerBands {
    fn absent(len: usize) -> Self {
        Self {
            middle: absent(len),
            upper: absent(len),
            lower: absent(len),
        }
    }
}

/// Calculate Bollinger Bands over `series`.
///
/// - `middle` = SMA(`period`)
/// - `upper`  = middle + `num_std` * σ
/// - `lower`  = middle - `num_std` * σ
///
/// σ divides by `period`, not `period - 1`. Wherever the middle band is
/// absent all three bands are absent; a series shorter than `period` yields
/// all-absent bands.
pub fn calculate_bollinger<P: PriceLike>(series: &[P], period: usize, num_std: f64) -> BollingerBands {
    if period == 0 || series.len() < period {
        return BollingerBands::absent(series.len());
    }

    let middle = calculate_sma(series, period);
    let mut upper = Vec::with_capacity(series.len());
    let mut lower = Vec::with_capacity(series.len());

    for (i, mid) in middle.iter().enumerate() {
        let Some(mean) = *mid else {
            upper.push(None);
            lower.push(None);
            continue;
        };

        let window = &series[i + 1 - period..=i];
        let variance = window
            .iter()
            .map(|p| (p.price_or_zero() - mean).powi(2))
            .sum::<f64>()
            / period as f64;
        let std_dev = variance.sqrt();

        upper.push(Some(mean + num_std * std_dev));
        lower.push(Some(mean - num_std * std_dev));
    }

    BollingerBands { middle, upper, lower }
}
