use std::collections::BTreeSet;

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::GroupResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Group builder form
// ---------------------------------------------------------------------------

/// Render the "add group" form and the clear-profile button.
pub fn group_form(ui: &mut Ui, state: &mut AppState) {
    // Clone so the form can be mutated while iterating.
    let vocabulary: Vec<String> = match &state.dataset {
        Some(ds) => {
            let needle = state.form.search.trim().to_lowercase();
            ds.tag_vocabulary
                .iter()
                .filter(|t| needle.is_empty() || t.contains(&needle))
                .cloned()
                .collect()
        }
        None => Vec::new(),
    };

    ui.group(|ui: &mut Ui| {
        ui.strong("Add group");
        ui.label("Group name");
        ui.text_edit_singleline(&mut state.form.name);

        ui.label("Search tags");
        ui.text_edit_singleline(&mut state.form.search);

        tag_picker(ui, "Inclusions", &vocabulary, &mut state.form.inclusions);
        tag_picker(ui, "Exclusions", &vocabulary, &mut state.form.exclusions);

        let can_submit = !state.form.name.trim().is_empty();
        if ui
            .add_enabled(can_submit, egui::Button::new("Add to profile"))
            .clicked()
        {
            state.submit_group_form();
        }
    });

    ui.add_space(8.0);
    if ui.button("🗑 Clear profile").clicked() {
        state.clear_active_profile();
    }
}

/// Collapsible checkbox list over the (search-filtered) tag vocabulary.
fn tag_picker(ui: &mut Ui, label: &str, vocabulary: &[String], selected: &mut BTreeSet<String>) {
    let header = format!("{label}  ({} selected)", selected.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(label)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if !selected.is_empty() {
                ui.label(selected.iter().cloned().collect::<Vec<_>>().join(", "));
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
                ui.separator();
            }

            ScrollArea::vertical()
                .id_salt(format!("{label}_scroll"))
                .max_height(220.0)
                .auto_shrink([false, true])
                .show(ui, |ui: &mut Ui| {
                    for tag in vocabulary {
                        let mut checked = selected.contains(tag);
                        if ui.checkbox(&mut checked, tag.as_str()).changed() {
                            if checked {
                                selected.insert(tag.clone());
                            } else {
                                selected.remove(tag);
                            }
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Results table
// ---------------------------------------------------------------------------

/// Render one row per group: name, games, median, hit rate.
pub fn results_table(ui: &mut Ui, results: &[GroupResult]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder().at_least(120.0))
        .columns(Column::auto().at_least(80.0), 3)
        .header(20.0, |mut header| {
            for title in ["Category", "Games", "Median", "Hit Rate %"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for r in results {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.count.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{}", r.median_reviews));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", r.hit_rate.unwrap_or(0.0)));
                    });
                });
            }
        });
}
