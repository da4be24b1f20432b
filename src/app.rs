use eframe::egui::{self, Ui};

use crate::analysis::GroupResult;
use crate::state::AppState;
use crate::ui::{groups, panels, plot};

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

pub struct GenreScoutApp {
    pub state: AppState,
}

impl GenreScoutApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GenreScoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: profiles and global filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: group builder, results, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("📊 {}", self.state.profiles.active_name()));

            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to start  (File → Open…)");
                });
                return;
            }

            ui.columns(2, |cols| {
                egui::ScrollArea::vertical()
                    .id_salt("group_form")
                    .show(&mut cols[0], |ui| {
                        groups::group_form(ui, &mut self.state);
                    });

                let ui = &mut cols[1];
                if self.state.results.is_empty() {
                    ui.label("No groups in this profile yet.");
                    return;
                }
                ui.push_id("results", |ui| {
                    groups::results_table(ui, &self.state.results);
                });
                ui.separator();
                plot::group_chart(ui, &self.state.results);
            });
        });
    }
}

// ---------------------------------------------------------------------------
// One-shot chart window
// ---------------------------------------------------------------------------

/// Read-only window showing the chart for a finished report.
pub struct ChartWindow {
    title: String,
    results: Vec<GroupResult>,
}

impl ChartWindow {
    pub fn new(title: impl Into<String>, results: Vec<GroupResult>) -> Self {
        Self {
            title: title.into(),
            results,
        }
    }
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(&self.title);
            });
            plot::group_chart(ui, &self.results);
        });
    }
}
