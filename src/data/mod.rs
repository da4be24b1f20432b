/// Data layer: record types, loading, and the global view filter.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  coerce rows, derive total_reviews, parse tags
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ GameDataset  │  Vec<GameRecord>, tag vocabulary, date range
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date lower bound / free toggle → visible indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod tags;
