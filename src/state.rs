use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::analysis::{aggregate, GroupResult};
use crate::config::{default_start_date, DEFAULT_THRESHOLD, THRESHOLD_MAX};
use crate::data::filter::{filtered_indices, ViewFilter};
use crate::data::loader::load_file;
use crate::data::model::GameDataset;
use crate::profile::{ProfileError, ProfileStore};

// ---------------------------------------------------------------------------
// Add-group form
// ---------------------------------------------------------------------------

/// Contents of the "add group" form between frames.
#[derive(Debug, Clone, Default)]
pub struct GroupForm {
    pub name: String,
    pub inclusions: BTreeSet<String>,
    pub exclusions: BTreeSet<String>,
    /// Substring filter over the tag vocabulary in the pickers.
    pub search: String,
}

impl GroupForm {
    fn reset(&mut self) {
        *self = GroupForm::default();
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// Constructed once per process and handed to every panel; every mutation
/// that can change the numbers ends in [`AppState::recompute`].
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<GameDataset>,

    /// Path the dataset was loaded from; loading it again is a no-op.
    pub source: Option<PathBuf>,

    /// Date lower bound and free-game toggle.
    pub view: ViewFilter,

    /// Review count needed for a hit.
    pub threshold: f64,

    /// Named profiles and the active selection.
    pub profiles: ProfileStore,

    /// Indices of records passing the view filter (cached).
    pub visible_indices: Vec<usize>,

    /// Results for the active profile, sorted by median descending (cached).
    pub results: Vec<GroupResult>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Text field of the "new profile" box.
    pub new_profile_name: String,

    pub form: GroupForm,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source: None,
            view: ViewFilter {
                start_date: Some(default_start_date()),
                exclude_free: true,
            },
            threshold: DEFAULT_THRESHOLD,
            profiles: ProfileStore::new(),
            visible_indices: Vec::new(),
            results: Vec::new(),
            status_message: None,
            new_profile_name: String::new(),
            form: GroupForm::default(),
        }
    }
}

impl AppState {
    /// Load `path` unless it is already the current source.
    pub fn load(&mut self, path: &Path) {
        if self.source.as_deref() == Some(path) && self.dataset.is_some() {
            log::debug!("{} already loaded", path.display());
            return;
        }
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} games with {} distinct tags from {}",
                    dataset.len(),
                    dataset.tag_vocabulary.len(),
                    path.display()
                );
                self.set_dataset(dataset, path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and recompute everything.
    pub fn set_dataset(&mut self, dataset: GameDataset, source: PathBuf) {
        if let (Some(start), Some((lo, hi))) = (self.view.start_date, dataset.date_range) {
            self.view.start_date = Some(start.clamp(lo, hi));
        }
        self.dataset = Some(dataset);
        self.source = Some(source);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a view-filter change, then results.
    pub fn refilter(&mut self) {
        self.visible_indices = match &self.dataset {
            Some(ds) => filtered_indices(ds, &self.view),
            None => Vec::new(),
        };
        self.recompute();
    }

    /// Re-aggregate the active profile over the visible records.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            self.results.clear();
            return;
        };
        let visible = self.visible_indices.iter().map(|&i| &ds.records[i]);
        self.results = aggregate(
            visible,
            self.profiles.active().groups(),
            Some(self.threshold),
        );
        log::debug!(
            "Recomputed {} groups over {} visible games",
            self.results.len(),
            self.visible_indices.len()
        );
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        if self.view.start_date != Some(date) {
            self.view.start_date = Some(date);
            self.refilter();
        }
    }

    pub fn set_exclude_free(&mut self, exclude: bool) {
        if self.view.exclude_free != exclude {
            self.view.exclude_free = exclude;
            self.refilter();
        }
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        let threshold = threshold.clamp(0.0, THRESHOLD_MAX);
        if self.threshold != threshold {
            self.threshold = threshold;
            self.recompute();
        }
    }

    /// Create a profile from the "new profile" box and switch to it.
    pub fn create_profile(&mut self) {
        let name = std::mem::take(&mut self.new_profile_name);
        match self.profiles.create(&name) {
            Ok(()) => self.recompute(),
            Err(e) => self.reject(e),
        }
    }

    pub fn select_profile(&mut self, name: &str) {
        match self.profiles.select(name) {
            Ok(()) => self.recompute(),
            Err(e) => self.reject(e),
        }
    }

    /// Add the form's group to the active profile and reset the form.
    pub fn submit_group_form(&mut self) {
        let active = self.profiles.active_name().to_string();
        let result = self.profiles.add_group(
            &active,
            &self.form.name,
            &self.form.inclusions,
            &self.form.exclusions,
        );
        match result {
            Ok(()) => {
                self.form.reset();
                self.status_message = None;
                self.recompute();
            }
            Err(e) => self.reject(e),
        }
    }

    pub fn clear_active_profile(&mut self) {
        let active = self.profiles.active_name().to_string();
        match self.profiles.clear(&active) {
            Ok(()) => self.recompute(),
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, e: ProfileError) {
        log::warn!("{e}");
        self.status_message = Some(e.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::GameRecord;
    use crate::data::tags::parse_tags;

    fn game(date: (i32, u32, u32), price: f64, raw_tags: &str, reviews: f64) -> GameRecord {
        GameRecord {
            name: String::new(),
            release_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            price,
            total_reviews: reviews,
            tags: parse_tags(raw_tags),
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(
            GameDataset::from_records(vec![
                game((2023, 6, 1), 5.0, "{'Puzzle': 1}", 4000.0),
                game((2024, 2, 1), 5.0, "{'Puzzle': 1}", 100.0),
                game((2024, 3, 1), 0.0, "{'Puzzle': 1}", 900.0),
                game((2024, 4, 1), 5.0, "{'Puzzle': 1, 'Horror': 1}", 2000.0),
            ]),
            PathBuf::from("memory.csv"),
        );
        state
    }

    fn add_group(state: &mut AppState, name: &str, inc: &[&str], exc: &[&str]) {
        state.form.name = name.to_string();
        state.form.inclusions = inc.iter().map(|t| t.to_string()).collect();
        state.form.exclusions = exc.iter().map(|t| t.to_string()).collect();
        state.submit_group_form();
    }

    #[test]
    fn test_default_view_applies_date_and_price() {
        let state = loaded_state();
        assert_eq!(state.visible_indices, vec![1, 3]);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_start_date_is_clamped_to_dataset_range() {
        let mut state = AppState::default();
        state.set_dataset(
            GameDataset::from_records(vec![game((2020, 1, 1), 1.0, "{}", 0.0)]),
            PathBuf::from("old.csv"),
        );
        assert_eq!(state.view.start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn test_group_results_follow_view_and_threshold() {
        let mut state = loaded_state();
        add_group(&mut state, "Puzzle", &["puzzle"], &[]);
        add_group(&mut state, "Pure Puzzle", &["puzzle"], &["horror"]);
        assert!(state.form.name.is_empty());

        let names: Vec<&str> = state.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Puzzle", "Pure Puzzle"]);
        assert_eq!(state.results[0].count, 2);
        assert_eq!(state.results[0].median_reviews, 1050.0);
        assert_eq!(state.results[0].hit_rate, Some(50.0));
        assert_eq!(state.results[1].count, 1);
        assert_eq!(state.results[1].median_reviews, 100.0);

        state.set_exclude_free(false);
        assert_eq!(state.results[0].count, 3);

        state.set_threshold(50.0);
        assert_eq!(state.results[0].hit_rate, Some(100.0));

        state.set_start_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(state.results[0].count, 4);
    }

    #[test]
    fn test_profiles_switch_results() {
        let mut state = loaded_state();
        add_group(&mut state, "Puzzle", &["puzzle"], &[]);

        state.new_profile_name = "Horror study".into();
        state.create_profile();
        assert_eq!(state.profiles.active_name(), "Horror study");
        assert!(state.results.is_empty());

        state.select_profile("Default Research");
        assert_eq!(state.results.len(), 1);

        state.clear_active_profile();
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_rejections_surface_as_status() {
        let mut state = loaded_state();
        state.new_profile_name = "Default Research".into();
        state.create_profile();
        assert!(state.status_message.is_some());

        state.status_message = None;
        add_group(&mut state, "", &["puzzle"], &[]);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_threshold_is_clamped() {
        let mut state = loaded_state();
        state.set_threshold(99_999.0);
        assert_eq!(state.threshold, THRESHOLD_MAX);
    }

    #[test]
    fn test_failed_load_keeps_session() {
        let mut state = AppState::default();
        state.load(Path::new("/definitely/not/here.csv"));
        assert!(state.dataset.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("Could not find")));
    }
}
