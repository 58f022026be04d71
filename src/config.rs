// =============================================================================
// Engine Configuration — indicator parameters and chart defaults
// =============================================================================
//
// Every tunable parameter of the analytics engine lives here.  All fields
// carry `#[serde(default)]` so that adding new fields never breaks loading
// an older config file.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::annotate::Indicator;
use crate::error::AnalyticsError;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_sma_short() -> usize {
    5
}

fn default_sma_long() -> usize {
    20
}

fn default_rsi_period() -> usize {
    14
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_multiplier() -> f64 {
    2.0
}

fn default_macd_short() -> usize {
    12
}

fn default_macd_long() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_indicators() -> Vec<Indicator> {
    vec![Indicator::Volume]
}

// =============================================================================
// TimeRange
// =============================================================================

/// Chart range requested from the data feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl TimeRange {
    /// Sampling interval the feed uses for this range.
    pub fn interval(self) -> &'static str {
        match self {
            Self::OneDay => "5m",
            Self::FiveDays => "30m",
            Self::OneMonth | Self::SixMonths | Self::OneYear => "1d",
            Self::FiveYears => "1wk",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
        };
        write!(f, "{label}")
    }
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Look-back periods for every chart overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// Fast simple moving average.
    #[serde(default = "default_sma_short")]
    pub sma_short: usize,

    /// Slow simple moving average.
    #[serde(default = "default_sma_long")]
    pub sma_long: usize,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Band distance from the middle line, in standard deviations.
    #[serde(default = "default_bollinger_multiplier")]
    pub bollinger_multiplier: f64,

    #[serde(default = "default_macd_short")]
    pub macd_short: usize,

    #[serde(default = "default_macd_long")]
    pub macd_long: usize,

    /// Period of the EMA applied to the MACD line.
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_short: default_sma_short(),
            sma_long: default_sma_long(),
            rsi_period: default_rsi_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_multiplier: default_bollinger_multiplier(),
            macd_short: default_macd_short(),
            macd_long: default_macd_long(),
            macd_signal: default_macd_signal(),
        }
    }
}

impl IndicatorParams {
    /// Reject zero periods. Only the periods of `selected` indicators are
    /// checked, so an unused bad period does not block a chart.
    pub fn validate(&self, selected: &[Indicator]) -> Result<(), AnalyticsError> {
        let checks: &[(Indicator, &'static str, usize)] = &[
            (Indicator::SmaShort, "sma_short", self.sma_short),
            (Indicator::SmaLong, "sma_long", self.sma_long),
            (Indicator::Rsi, "rsi_period", self.rsi_period),
            (Indicator::Bollinger, "bollinger_period", self.bollinger_period),
            (Indicator::Macd, "macd_short", self.macd_short),
            (Indicator::Macd, "macd_long", self.macd_long),
            (Indicator::Macd, "macd_signal", self.macd_signal),
        ];

        for &(indicator, name, period) in checks {
            if period == 0 && selected.contains(&indicator) {
                return Err(AnalyticsError::InvalidPeriod {
                    indicator: name,
                    period,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub indicators: IndicatorParams,

    /// Overlays shown when a single asset is first charted.
    #[serde(default = "default_indicators")]
    pub default_indicators: Vec<Indicator>,

    #[serde(default)]
    pub range: TimeRange,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorParams::default(),
            default_indicators: default_indicators(),
            range: TimeRange::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            range = %config.range,
            indicators = ?config.default_indicators,
            "engine config loaded"
        );

        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.range, TimeRange::OneYear);
        assert_eq!(cfg.default_indicators, vec![Indicator::Volume]);
        assert_eq!(cfg.indicators.sma_short, 5);
        assert_eq!(cfg.indicators.sma_long, 20);
        assert_eq!(cfg.indicators.rsi_period, 14);
        assert_eq!(cfg.indicators.macd_long, 26);
        assert!((cfg.indicators.bollinger_multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.indicators, IndicatorParams::default());
        assert_eq!(cfg.default_indicators, vec![Indicator::Volume]);
        assert_eq!(cfg.range, TimeRange::OneYear);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "range": "5d", "indicators": { "rsi_period": 9 } }"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.range, TimeRange::FiveDays);
        assert_eq!(cfg.range.interval(), "30m");
        assert_eq!(cfg.indicators.rsi_period, 9);
        assert_eq!(cfg.indicators.sma_short, 5);
    }

    #[test]
    fn negative_period_rejected_by_parser() {
        let json = r#"{ "indicators": { "sma_short": -5 } }"#;
        assert!(serde_json::from_str::<EngineConfig>(json).is_err());
    }

    #[test]
    fn zero_period_of_selected_indicator_is_invalid() {
        let params = IndicatorParams {
            macd_signal: 0,
            ..IndicatorParams::default()
        };
        assert!(params.validate(&[Indicator::SmaShort, Indicator::Rsi]).is_ok());
        assert_eq!(
            params.validate(&[Indicator::Macd]),
            Err(AnalyticsError::InvalidPeriod {
                indicator: "macd_signal",
                period: 0
            })
        );
    }

    #[test]
    fn range_display_matches_wire_label() {
        for range in [TimeRange::OneDay, TimeRange::SixMonths, TimeRange::FiveYears] {
            let wire = serde_json::to_string(&range).unwrap();
            assert_eq!(wire, format!("\"{range}\""));
        }
    }
}
