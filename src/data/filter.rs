use chrono::NaiveDate;

use super::model::{GameDataset, GameRecord};

// ---------------------------------------------------------------------------
// Global view filter: release-date lower bound and free-game exclusion
// ---------------------------------------------------------------------------

/// Session-wide constraints applied before any group is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewFilter {
    /// Earliest release date to keep. Records without a known date fail any
    /// bound.
    pub start_date: Option<NaiveDate>,
    /// Drop games whose price is zero (or was unparseable).
    pub exclude_free: bool,
}

impl ViewFilter {
    /// Whether a single record passes the filter.
    pub fn admits(&self, record: &GameRecord) -> bool {
        if let Some(start) = self.start_date {
            match record.release_date {
                Some(date) if date >= start => {}
                _ => return false,
            }
        }
        !(self.exclude_free && record.is_free())
    }
}

/// Return indices of records that pass the view filter, in dataset order.
pub fn filtered_indices(dataset: &GameDataset, filter: &ViewFilter) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.admits(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(date: Option<(i32, u32, u32)>, price: f64) -> GameRecord {
        GameRecord {
            name: String::new(),
            release_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            price,
            total_reviews: 0.0,
            tags: Vec::new(),
        }
    }

    fn dataset() -> GameDataset {
        GameDataset::from_records(vec![
            game(Some((2023, 12, 31)), 5.0),
            game(Some((2024, 1, 1)), 0.0),
            game(Some((2024, 6, 1)), 10.0),
            game(None, 10.0),
        ])
    }

    #[test]
    fn test_no_constraints_keeps_everything() {
        let ds = dataset();
        assert_eq!(filtered_indices(&ds, &ViewFilter::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_start_date_is_inclusive_and_drops_undated() {
        let ds = dataset();
        let filter = ViewFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            exclude_free: false,
        };
        assert_eq!(filtered_indices(&ds, &filter), vec![1, 2]);
    }

    #[test]
    fn test_exclude_free() {
        let ds = dataset();
        let filter = ViewFilter {
            start_date: None,
            exclude_free: true,
        };
        assert_eq!(filtered_indices(&ds, &filter), vec![0, 2, 3]);
    }

    #[test]
    fn test_combined_filters() {
        let ds = dataset();
        let filter = ViewFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            exclude_free: true,
        };
        assert_eq!(filtered_indices(&ds, &filter), vec![2]);
    }
}
