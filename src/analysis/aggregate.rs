use serde::Serialize;

use super::spec::{matches, FilterSpec};
use crate::data::model::GameRecord;

// ---------------------------------------------------------------------------
// Per-group statistics
// ---------------------------------------------------------------------------

/// Statistics for one named group over the records it was evaluated on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupResult {
    pub name: String,
    pub count: usize,
    /// Median of `total_reviews` over the matches; 0 when nothing matched.
    pub median_reviews: f64,
    /// Share of matches at or above the success threshold, in percent,
    /// rounded to two decimals. Only present when a threshold was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_rate: Option<f64>,
}

impl GroupResult {
    /// Whether nothing matched, i.e. `median_reviews` is a placeholder.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Median of a set of values; the mean of the two middle values for even
/// lengths. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Evaluate every group against `records` and sort by median descending.
///
/// Ties keep the order of `groups`.
pub fn aggregate<'a, I>(
    records: I,
    groups: &[(String, FilterSpec)],
    threshold: Option<f64>,
) -> Vec<GroupResult>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let records: Vec<&GameRecord> = records.into_iter().collect();

    let mut results: Vec<GroupResult> = groups
        .iter()
        .map(|(name, spec)| {
            let matched: Vec<f64> = records
                .iter()
                .filter(|r| matches(&r.tags, spec))
                .map(|r| r.total_reviews)
                .collect();
            let count = matched.len();

            let hit_rate = threshold.map(|t| {
                if count == 0 {
                    return 0.0;
                }
                let hits = matched.iter().filter(|&&v| v >= t).count();
                round2(hits as f64 / count as f64 * 100.0)
            });

            GroupResult {
                name: name.clone(),
                count,
                median_reviews: median(&matched).unwrap_or(0.0),
                hit_rate,
            }
        })
        .collect();

    // `sort_by` is stable.
    results.sort_by(|a, b| b.median_reviews.total_cmp(&a.median_reviews));
    results
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
