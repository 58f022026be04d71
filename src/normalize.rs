// =============================================================================
// Multi-asset alignment and normalization
// =============================================================================
//
// Merges independently sampled series onto one timeline and rebases each to
// 100 at its first defined price, so assets of very different magnitude and
// cadence can share a chart.
//
// Step 1 — Union of all observation timestamps, ascending.
// Step 2 — Base price per asset = first defined price.  Assets whose base is
//          missing or not strictly positive are dropped.
// Step 3 — Rebase every observation: price / base * 100.
// Step 4 — Walk the timeline left to right; an asset without an observation
//          at a timestamp carries its previous merged value forward.
// Step 5 — Drop the prefix before every surviving asset has a value.
// =============================================================================

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::types::{PriceLike, SeriesPoint};

/// Value every asset is rebased to at its first observation.
pub const REBASE_BASE: f64 = 100.0;

/// One timestamp of the merged chart. Values keep the caller's asset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedPoint {
    pub timestamp: i64,
    #[serde(flatten)]
    pub values: IndexMap<String, Option<f64>>,
}

/// Sorted union of the timestamps of every series.
pub fn unified_timeline(series: &IndexMap<String, Vec<SeriesPoint>>) -> Vec<i64> {
    series
        .values()
        .flatten()
        .map(|p| p.timestamp)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// First defined price of `series`, if it is strictly positive.
pub fn base_price(series: &[SeriesPoint]) -> Option<f64> {
    series
        .iter()
        .find_map(PriceLike::price)
        .filter(|&base| base > 0.0)
}

/// Rebased value of each observation with a defined price, keyed by timestamp.
fn rebase(series: &[SeriesPoint], base: f64) -> HashMap<i64, f64> {
    series
        .iter()
        .filter_map(|p| Some((p.timestamp, p.price()? / base * REBASE_BASE)))
        .collect()
}

/// Merge and rebase `series` (asset id => observations) onto one timeline.
///
/// The result starts at the first timestamp where every surviving asset has
/// a value; it is empty when no such timestamp exists or no asset survives.
pub fn merge_normalized(series: &IndexMap<String, Vec<SeriesPoint>>) -> Vec<MergedPoint> {
    let timeline = unified_timeline(series);

    let rebased: IndexMap<&str, HashMap<i64, f64>> = series
        .iter()
        .filter_map(|(id, points)| match base_price(points) {
            Some(base) => Some((id.as_str(), rebase(points, base))),
            None => {
                debug!(asset = %id, points = points.len(), "asset excluded from normalization");
                None
            }
        })
        .collect();

    if rebased.is_empty() {
        return Vec::new();
    }

    let mut merged: Vec<MergedPoint> = Vec::with_capacity(timeline.len());
    for &timestamp in &timeline {
        let previous = merged.last();
        let values = rebased
            .iter()
            .map(|(&id, by_time)| {
                let value = by_time
                    .get(&timestamp)
                    .copied()
                    .or_else(|| previous.and_then(|p| p.values[id]));
                (id.to_string(), value)
            })
            .collect();
        merged.push(MergedPoint { timestamp, values });
    }

    let Some(first_complete) = merged
        .iter()
        .position(|p| p.values.values().all(Option::is_some))
    else {
        return Vec::new();
    };

    debug!(
        assets = rebased.len(),
        timeline = timeline.len(),
        trimmed = first_complete,
        "merged multi-asset series"
    );

    merged.split_off(first_complete)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> Vec<SeriesPoint> {
        points.iter().map(|&(t, p)| SeriesPoint::new(t, p)).collect()
    }

    fn assets(entries: Vec<(&str, Vec<SeriesPoint>)>) -> IndexMap<String, Vec<SeriesPoint>> {
        entries.into_iter().map(|(id, s)| (id.to_string(), s)).collect()
    }

    #[test]
    fn forward_fills_sparser_asset() {
        let input = assets(vec![
            ("A", series(&[(0, 50.0), (10, 55.0), (20, 60.0)])),
            ("B", series(&[(0, 200.0), (20, 180.0)])),
        ]);
        let merged = merge_normalized(&input);
        assert_eq!(merged.len(), 3);

        let at_10 = &merged[1];
        assert_eq!(at_10.timestamp, 10);
        assert!((at_10.values["A"].unwrap() - 110.0).abs() < 1e-10);
        assert!((at_10.values["B"].unwrap() - 100.0).abs() < 1e-10);
        assert!((merged[2].values["B"].unwrap() - 90.0).abs() < 1e-10);
    }

    #[test]
    fn disjoint_grids_unify_and_trim() {
        let input = assets(vec![
            ("A", series(&[(0, 10.0), (20, 11.0), (40, 12.0)])),
            ("B", series(&[(10, 5.0), (30, 6.0)])),
        ]);
        assert_eq!(unified_timeline(&input), vec![0, 10, 20, 30, 40]);

        let merged = merge_normalized(&input);
        let stamps: Vec<i64> = merged.iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![10, 20, 30, 40]);
        // A at t=10 is carried from t=0, never pulled back from t=20.
        assert_eq!(merged[0].values["A"], Some(100.0));
    }

    #[test]
    fn first_value_of_each_asset_is_100() {
        let input = assets(vec![
            ("GC=F", series(&[(0, 1900.0), (5, 1925.0)])),
            ("SI=F", series(&[(0, 23.5), (5, 23.0)])),
        ]);
        let merged = merge_normalized(&input);
        assert_eq!(merged[0].values["GC=F"], Some(100.0));
        assert_eq!(merged[0].values["SI=F"], Some(100.0));
    }

    #[test]
    fn values_follow_caller_order() {
        let input = assets(vec![
            ("ZW=F", series(&[(0, 5.0)])),
            ("CL=F", series(&[(0, 70.0)])),
            ("HG=F", series(&[(0, 4.0)])),
        ]);
        let merged = merge_normalized(&input);
        let ids: Vec<&str> = merged[0].values.keys().map(String::as_str).collect();
        assert_eq!(ids, ["ZW=F", "CL=F", "HG=F"]);
    }

    #[test]
    fn non_positive_base_excludes_asset() {
        let input = assets(vec![
            ("A", series(&[(0, 10.0), (1, 12.0)])),
            ("NEG", series(&[(0, -3.0), (1, 4.0)])),
            ("EMPTY", Vec::new()),
        ]);
        let merged = merge_normalized(&input);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|p| p.values.len() == 1 && p.values.contains_key("A")));
    }

    #[test]
    fn missing_leading_price_uses_first_defined_base() {
        let input = assets(vec![
            ("A", series(&[(0, f64::NAN), (1, 20.0), (2, 30.0)])),
            ("B", series(&[(0, 1.0), (2, 2.0)])),
        ]);
        let merged = merge_normalized(&input);
        assert_eq!(merged[0].timestamp, 1);
        assert_eq!(merged[0].values["A"], Some(100.0));
        assert_eq!(merged[1].values["A"], Some(150.0));
    }

    #[test]
    fn nothing_to_merge() {
        assert!(merge_normalized(&IndexMap::new()).is_empty());
        let input = assets(vec![("ZERO", series(&[(0, 0.0), (1, 1.0)]))]);
        assert!(merge_normalized(&input).is_empty());
    }
}
