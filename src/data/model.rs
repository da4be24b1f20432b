use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Metric deriver
// ---------------------------------------------------------------------------

/// Total review count from the positive / negative counters.
///
/// Missing or NaN counters count as zero. Negative inputs are summed as-is.
pub fn total_reviews(positive: Option<f64>, negative: Option<f64>) -> f64 {
    let count = |v: Option<f64>| v.filter(|n| !n.is_nan()).unwrap_or(0.0);
    count(positive) + count(negative)
}

// ---------------------------------------------------------------------------
// GameRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single game with its derived fields already computed.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub name: String,
    /// `None` when the source date could not be parsed.
    pub release_date: Option<NaiveDate>,
    /// Zero for free games and for missing / non-numeric prices.
    pub price: f64,
    /// positive + negative.
    pub total_reviews: f64,
    /// Normalized (lowercase, trimmed) tag names in source order.
    pub tags: Vec<String>,
}

impl GameRecord {
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }
}

// ---------------------------------------------------------------------------
// GameDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded dataset plus indices computed once at load time.
#[derive(Debug, Clone, Default)]
pub struct GameDataset {
    /// All records, in file order.
    pub records: Vec<GameRecord>,
    /// Sorted set of every tag seen in any record.
    pub tag_vocabulary: BTreeSet<String>,
    /// Earliest and latest known release dates.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl GameDataset {
    /// Build the vocabulary and date range from the loaded records.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let tag_vocabulary: BTreeSet<String> = records
            .iter()
            .flat_map(|r| r.tags.iter().cloned())
            .collect();

        let date_range = records
            .iter()
            .filter_map(|r| r.release_date)
            .fold(None, |range, d| match range {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            });

        GameDataset {
            records,
            tag_vocabulary,
            date_range,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, date: Option<(i32, u32, u32)>, tags: &[&str]) -> GameRecord {
        GameRecord {
            name: name.to_string(),
            release_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            price: 0.0,
            total_reviews: 0.0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_total_reviews_missing_counts_as_zero() {
        assert_eq!(total_reviews(None, Some(5.0)), 5.0);
        assert_eq!(total_reviews(Some(7.0), None), 7.0);
        assert_eq!(total_reviews(None, None), 0.0);
        assert_eq!(total_reviews(Some(100.0), Some(50.0)), 150.0);
    }

    #[test]
    fn test_total_reviews_nan_counts_as_zero() {
        assert_eq!(total_reviews(Some(f64::NAN), Some(5.0)), 5.0);
        assert_eq!(total_reviews(Some(10.0), Some(f64::NAN)), 10.0);
        assert_eq!(total_reviews(Some(f64::NAN), Some(f64::NAN)), 0.0);
    }

    #[test]
    fn test_total_reviews_passes_negative_through() {
        assert_eq!(total_reviews(Some(-3.0), Some(1.0)), -2.0);
    }

    #[test]
    fn test_vocabulary_and_date_range() {
        let ds = GameDataset::from_records(vec![
            record("a", Some((2024, 5, 1)), &["puzzle", "co-op"]),
            record("b", None, &["horror", "puzzle"]),
            record("c", Some((2019, 1, 2)), &[]),
        ]);

        let vocab: Vec<&str> = ds.tag_vocabulary.iter().map(String::as_str).collect();
        assert_eq!(vocab, vec!["co-op", "horror", "puzzle"]);
        assert_eq!(
            ds.date_range,
            Some((
                NaiveDate::from_ymd_opt(2019, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
            ))
        );
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_empty_dataset_has_no_range() {
        let ds = GameDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.date_range.is_none());
        assert!(ds.tag_vocabulary.is_empty());
    }
}
