use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::THRESHOLD_MAX;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – profiles and global filters
// ---------------------------------------------------------------------------

/// Render the left panel: profile manager, then the view-filter controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Profiles");
    ui.separator();
    profile_manager(ui, state);

    ui.add_space(8.0);
    ui.heading("Global filters");
    ui.separator();
    global_filters(ui, state);
}

fn profile_manager(ui: &mut Ui, state: &mut AppState) {
    ui.label("New profile name");
    ui.text_edit_singleline(&mut state.new_profile_name);
    if ui.button("➕ Create profile").clicked() {
        state.create_profile();
    }

    ui.add_space(4.0);
    ui.strong("Active profile");

    // Clone so the store can be mutated from inside the combo box.
    let names: Vec<String> = state.profiles.names().map(str::to_string).collect();
    let active = state.profiles.active_name().to_string();
    egui::ComboBox::from_id_salt("active_profile")
        .selected_text(&active)
        .show_ui(ui, |ui: &mut Ui| {
            for name in &names {
                if ui.selectable_label(*name == active, name).clicked() && *name != active {
                    state.select_profile(name);
                }
            }
        });
}

fn global_filters(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.strong("Earliest release date");
    if let Some(mut start) = state.view.start_date {
        let response = ui.add(egui_extras::DatePickerButton::new(&mut start).id_salt("start_date"));
        if response.changed() {
            state.set_start_date(start);
        }
    }

    ui.add_space(4.0);
    let mut exclude_free = state.view.exclude_free;
    if ui.checkbox(&mut exclude_free, "Exclude free games").changed() {
        state.set_exclude_free(exclude_free);
    }

    ui.add_space(4.0);
    ui.strong("Success threshold (reviews)");
    let mut threshold = state.threshold;
    let slider = egui::Slider::new(&mut threshold, 0.0..=THRESHOLD_MAX)
        .step_by(50.0)
        .fixed_decimals(0);
    if ui.add(slider).changed() {
        state.set_threshold(threshold);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} games loaded, {} in view",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open game dataset")
        .add_filter("Supported files", &["csv", "tsv", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
