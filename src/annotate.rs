// =============================================================================
// Single-asset chart assembly
// =============================================================================
//
// Runs the requested overlays over one price series and zips their outputs
// into one row per input point.  Overlays that were not requested are never
// computed.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IndicatorParams;
use crate::error::Result;
use crate::indicators::{calculate_bollinger, calculate_macd, calculate_rsi, calculate_sma};
use crate::types::{IndicatorSeries, SeriesPoint};

/// The fixed set of overlays a chart can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    SmaShort,
    SmaLong,
    Rsi,
    Bollinger,
    Macd,
    /// Raw volume passthrough; nothing is computed.
    Volume,
}

impl Indicator {
    /// Column order of an annotated row.
    pub const ALL: [Indicator; 6] = [
        Indicator::SmaShort,
        Indicator::SmaLong,
        Indicator::Rsi,
        Indicator::Bollinger,
        Indicator::Macd,
        Indicator::Volume,
    ];
}

/// One chart row: the raw observation plus every requested overlay value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPoint {
    pub timestamp: i64,
    pub price: f64,
    /// Present only when [`Indicator::Volume`] was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Overlay columns keyed by name (`SMA5`, `RSI14`, `BB_UPPER`, ...).
    #[serde(flatten)]
    pub columns: IndexMap<String, Option<f64>>,
}

/// Compute the `selected` overlays over `series` and zip them by index.
///
/// Fails only when a selected overlay has a zero period.
pub fn annotate(
    series: &[SeriesPoint],
    selected: &[Indicator],
    params: &IndicatorParams,
) -> Result<Vec<AnnotatedPoint>> {
    params.validate(selected)?;

    let columns = compute_columns(series, selected, params);
    let with_volume = selected.contains(&Indicator::Volume);

    debug!(
        points = series.len(),
        columns = columns.len(),
        with_volume,
        "annotating single-asset series"
    );

    let rows = series
        .iter()
        .enumerate()
        .map(|(i, point)| AnnotatedPoint {
            timestamp: point.timestamp,
            price: point.price,
            volume: if with_volume { point.volume } else { None },
            columns: columns
                .iter()
                .map(|(name, values)| (name.clone(), values[i]))
                .collect(),
        })
        .collect();

    Ok(rows)
}

fn compute_columns(
    series: &[SeriesPoint],
    selected: &[Indicator],
    params: &IndicatorParams,
) -> Vec<(String, IndicatorSeries)> {
    let mut columns = Vec::new();

    for indicator in Indicator::ALL.into_iter().filter(|i| selected.contains(i)) {
        match indicator {
            Indicator::SmaShort => columns.push((
                format!("SMA{}", params.sma_short),
                calculate_sma(series, params.sma_short),
            )),
            Indicator::SmaLong => columns.push((
                format!("SMA{}", params.sma_long),
                calculate_sma(series, params.sma_long),
            )),
            Indicator::Rsi => columns.push((
                format!("RSI{}", params.rsi_period),
                calculate_rsi(series, params.rsi_period),
            )),
            Indicator::Bollinger => {
                let bb = calculate_bollinger(series, params.bollinger_period, params.bollinger_multiplier);
                columns.push(("BB_UPPER".to_string(), bb.upper));
                columns.push(("BB_MIDDLE".to_string(), bb.middle));
                columns.push(("BB_LOWER".to_string(), bb.lower));
            }
            Indicator::Macd => {
                let macd = calculate_macd(series, params.macd_short, params.macd_long, params.macd_signal);
                columns.push(("MACD_LINE".to_string(), macd.line));
                columns.push(("MACD_SIGNAL".to_string(), macd.signal));
                columns.push(("MACD_HISTOGRAM".to_string(), macd.histogram));
            }
            Indicator::Volume => {}
        }
    }

    columns
}
