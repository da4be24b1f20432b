//! Defaults shared by both binaries. Per-run overrides come from the command
//! line; log verbosity from `RUST_LOG`.

use chrono::NaiveDate;

use crate::analysis::FilterSpec;

/// Input file read when no path is given.
pub const DEFAULT_DATA_FILE: &str = "games_march2025_cleaned.csv";

/// Profile that exists at session start.
pub const DEFAULT_PROFILE: &str = "Default Research";

/// Review count a game needs to count as a hit.
pub const DEFAULT_THRESHOLD: f64 = 1000.0;

/// Upper bound of the threshold slider.
pub const THRESHOLD_MAX: f64 = 5000.0;

/// Initial release-date lower bound of the interactive session.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Groups compared by the one-shot report when none are given.
pub fn default_groups() -> Vec<(String, FilterSpec)> {
    [
        ("Puzzle", &["puzzle"][..]),
        ("Detective Puzzle", &["puzzle", "detective"][..]),
        ("Horror", &["horror"][..]),
        ("Cozy Farm", &["farming sim", "cozy"][..]),
        ("RPG", &["rpg"][..]),
    ]
    .into_iter()
    .map(|(name, tags)| (name.to_string(), FilterSpec::requiring(tags)))
    .collect()
}
