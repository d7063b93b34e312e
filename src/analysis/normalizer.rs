//! Percentile-based (P5–P95) score normalization
//!
//! The same routine serves two groupings: industry rows across years, and
//! companies within one industry. Callers pick the grouping key and the pair
//! of raw-value extractors.

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;

pub const LOWER_PERCENTILE: f64 = 0.05;
pub const UPPER_PERCENTILE: f64 = 0.95;
pub const SCORE_FLOOR: f64 = 10.0;
pub const SCORE_CEILING: f64 = 90.0;

/// P5/P95 of one raw axis. Always `p5 <= p95`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub p5: f64,
    pub p95: f64,
}

impl Bounds {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let p5 = percentile_sorted(&sorted, LOWER_PERCENTILE)?;
        let p95 = percentile_sorted(&sorted, UPPER_PERCENTILE)?;
        Some(Self { p5, p95 })
    }

    /// Width used for rescaling; equal bounds get a unit range.
    pub fn range(&self) -> f64 {
        if self.p95 != self.p5 {
            self.p95 - self.p5
        } else {
            1.0
        }
    }

    /// Clip to `[p5, p95]`, rescale onto 0–100, then clamp to 10–90.
    pub fn scale(&self, raw: f64) -> f64 {
        let clipped = raw.max(self.p5).min(self.p95);
        let score = (clipped - self.p5) / self.range() * 100.0;
        score.clamp(SCORE_FLOOR, SCORE_CEILING)
    }
}

/// Supply and demand bounds for one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizationBounds {
    pub supply: Bounds,
    pub demand: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedScore {
    pub supply_score: f64,
    pub demand_score: f64,
}

/// Linear-interpolation percentile (the "linear" method, not nearest rank).
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, q)
}

fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Normalize `items` group by group.
///
/// Returns one score per item (in input order) and the bounds of every group.
pub fn group_normalize<T, K>(
    items: &[T],
    key: impl Fn(&T) -> K,
    supply_raw: impl Fn(&T) -> f64,
    demand_raw: impl Fn(&T) -> f64,
) -> (Vec<NormalizedScore>, BTreeMap<K, NormalizationBounds>)
where
    K: Ord + Clone + Debug,
{
    let mut groups: BTreeMap<K, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for item in items {
        let entry = groups.entry(key(item)).or_default();
        entry.0.push(supply_raw(item));
        entry.1.push(demand_raw(item));
    }

    let mut bounds = BTreeMap::new();
    for (group, (supply, demand)) in groups {
        // Every group holds at least one value, so both bounds exist
        let (Some(supply), Some(demand)) = (Bounds::from_values(&supply), Bounds::from_values(&demand))
        else {
            continue;
        };
        debug!(
            "{:?}: supply P5 {:.2} P95 {:.2}, demand P5 {:.2} P95 {:.2}",
            group, supply.p5, supply.p95, demand.p5, demand.p95
        );
        bounds.insert(group, NormalizationBounds { supply, demand });
    }

    let scores = items
        .iter()
        .map(|item| {
            let group = &bounds[&key(item)];
            NormalizedScore {
                supply_score: group.supply.scale(supply_raw(item)),
                demand_score: group.demand.scale(demand_raw(item)),
            }
        })
        .collect();

    (scores, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_percentile() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        // position = 0.05 * 4 = 0.2 → 1.2
        assert!((percentile(&values, 0.05).unwrap() - 1.2).abs() < 1e-12);
        // position = 0.95 * 4 = 3.8 → 4.8
        assert!((percentile(&values, 0.95).unwrap() - 4.8).abs() < 1e-12);
        assert_eq!(percentile(&values, 0.5), Some(3.0));
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(percentile(&[7.0], 0.95), Some(7.0));
    }

    #[test]
    fn test_scale_hits_band_edges_at_bounds() {
        let bounds = Bounds { p5: 2.0, p95: 12.0 };
        assert_eq!(bounds.scale(2.0), SCORE_FLOOR);
        assert_eq!(bounds.scale(12.0), SCORE_CEILING);
        assert_eq!(bounds.scale(7.0), 50.0);
        assert_eq!(bounds.scale(-100.0), SCORE_FLOOR);
        assert_eq!(bounds.scale(1000.0), SCORE_CEILING);
    }

    #[test]
    fn test_degenerate_bounds_use_unit_range() {
        let bounds = Bounds::from_values(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(bounds.range(), 1.0);
        assert_eq!(bounds.scale(3.0), SCORE_FLOOR);
    }

    #[test]
    fn test_groups_are_independent() {
        let items = vec![
            ("A", 1.0, 10.0),
            ("A", 2.0, 20.0),
            ("A", 3.0, 30.0),
            ("B", 100.0, 0.1),
            ("B", 200.0, 0.2),
        ];
        let (scores, bounds) = group_normalize(&items, |i| i.0, |i| i.1, |i| i.2);

        assert_eq!(scores.len(), 5);
        assert_eq!(bounds.len(), 2);
        assert!((bounds["A"].supply.p5 - 1.1).abs() < 1e-12);
        assert!((bounds["B"].supply.p95 - 195.0).abs() < 1e-12);
        assert!(bounds.values().all(|b| b.supply.p5 <= b.supply.p95));

        for score in &scores {
            assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&score.supply_score));
            assert!((SCORE_FLOOR..=SCORE_CEILING).contains(&score.demand_score));
        }
        assert_eq!(scores[0].supply_score, SCORE_FLOOR);
        assert_eq!(scores[2].supply_score, SCORE_CEILING);
        assert!((scores[1].supply_score - 50.0).abs() < 1e-9);
    }
}
