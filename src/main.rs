// =============================================================================
// Commodity Analytics — command-line entry point
// =============================================================================
//
// Usage: commodity-analytics <ID=series.json>...
//
// Each file holds a JSON array of `{timestamp, price, volume?}` points.  One
// asset yields an annotated chart, several yield a rebased comparison.  The
// chart is printed as JSON on stdout; logs go to stderr.
// =============================================================================

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commodity_analytics::{build_chart, settle_all, EngineConfig, SeriesPoint};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path =
        std::env::var("ANALYTICS_CONFIG").unwrap_or_else(|_| "engine_config.json".into());
    let config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });

    // ── 2. Asset arguments ───────────────────────────────────────────────
    let assets = parse_asset_args(std::env::args().skip(1))?;
    if assets.is_empty() {
        bail!("usage: commodity-analytics <ID=series.json>...");
    }

    info!(
        assets = assets.len(),
        range = %config.range,
        interval = config.range.interval(),
        "Loading asset series"
    );

    // ── 3. Load concurrently, tolerate per-asset failures ────────────────
    let jobs = assets
        .into_iter()
        .map(|(id, path)| (id, load_series(path)))
        .collect();
    let settled = settle_all(jobs).await;

    // ── 4. Build and emit the chart ──────────────────────────────────────
    let view = build_chart(&settled.loaded, &config.default_indicators, &config.indicators)
        .context("no asset series could be loaded")?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Split `ID=path` arguments. Tickers may contain `=` themselves (`GC=F`),
/// so the split happens at the last one.
fn parse_asset_args(args: impl Iterator<Item = String>) -> Result<Vec<(String, PathBuf)>> {
    args.map(|arg| match arg.rsplit_once('=') {
        Some((id, path)) if !id.is_empty() && !path.is_empty() => {
            Ok((id.to_string(), PathBuf::from(path)))
        }
        _ => bail!("expected ID=path, got '{arg}'"),
    })
    .collect()
}

async fn load_series(path: PathBuf) -> Result<Vec<SeriesPoint>> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read series from {}", path.display()))?;

    let series: Vec<SeriesPoint> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse series from {}", path.display()))?;

    if let (Some(from), Some(to)) = (
        series.first().and_then(SeriesPoint::time),
        series.last().and_then(SeriesPoint::time),
    ) {
        debug!(path = %path.display(), points = series.len(), %from, %to, "series loaded");
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_with_equals_sign() {
        let parsed = parse_asset_args(["GC=F=data/gold.json".to_string()].into_iter()).unwrap();
        assert_eq!(parsed, vec![("GC=F".to_string(), PathBuf::from("data/gold.json"))]);
    }

    #[test]
    fn malformed_argument_rejected() {
        assert!(parse_asset_args(["gold.json".to_string()].into_iter()).is_err());
        assert!(parse_asset_args(["GC=F=".to_string()].into_iter()).is_err());
    }
}
