use eframe::egui::Ui;
use egui_plot::{AxisHints, Bar, BarChart, HPlacement, Legend, Line, Plot, PlotPoints, Points};

use crate::analysis::GroupResult;
use crate::color::{generate_palette, MEDIAN_LINE};

// ---------------------------------------------------------------------------
// Supply vs. success chart
// ---------------------------------------------------------------------------

/// Factor mapping median reviews onto the game-count axis, so both series
/// share one plot. The right-hand axis divides it back out.
pub fn median_scale(results: &[GroupResult]) -> f64 {
    let max_count = results.iter().map(|r| r.count).max().unwrap_or(0) as f64;
    let max_median = results
        .iter()
        .map(|r| r.median_reviews)
        .fold(0.0_f64, f64::max);
    if max_count > 0.0 && max_median > 0.0 {
        max_count / max_median
    } else {
        1.0
    }
}

/// Group name for an integer x position, empty between bars.
fn x_label(names: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    names.get(i as usize).cloned().unwrap_or_default()
}

/// Bars for game counts, a line for median reviews on a secondary axis.
/// `results` are drawn in the order given.
pub fn group_chart(ui: &mut Ui, results: &[GroupResult]) {
    if results.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Add a group to compare");
        });
        return;
    }

    let scale = median_scale(results);
    let names: Vec<String> = results.iter().map(|r| r.name.clone()).collect();
    let palette = generate_palette(results.len());

    let bars: Vec<Bar> = results
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (r, color))| {
            Bar::new(i as f64, r.count as f64)
                .name(&r.name)
                .fill(color)
                .width(0.6)
        })
        .collect();

    let medians: Vec<[f64; 2]> = results
        .iter()
        .enumerate()
        .map(|(i, r)| [i as f64, r.median_reviews * scale])
        .collect();

    Plot::new("group_chart")
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| x_label(&names, mark.value))
        .custom_y_axes(vec![
            AxisHints::new_y().label("Number of Games"),
            AxisHints::new_y()
                .label("Median Reviews")
                .placement(HPlacement::Right)
                .formatter(move |mark, _range| format!("{:.0}", mark.value / scale)),
        ])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Games"));
            plot_ui.line(
                Line::new(PlotPoints::from(medians.clone()))
                    .name("Median Success")
                    .color(MEDIAN_LINE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(medians))
                    .name("Median Success")
                    .color(MEDIAN_LINE)
                    .radius(4.0),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(count: usize, median: f64) -> GroupResult {
        GroupResult {
            name: String::new(),
            count,
            median_reviews: median,
            hit_rate: None,
        }
    }

    #[test]
    fn test_median_scale_maps_max_median_to_max_count() {
        let results = [result(40, 1500.0), result(10, 300.0)];
        let scale = median_scale(&results);
        assert!((1500.0 * scale - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_scale_degenerate_cases() {
        assert_eq!(median_scale(&[]), 1.0);
        assert_eq!(median_scale(&[result(0, 0.0)]), 1.0);
        assert_eq!(median_scale(&[result(5, 0.0)]), 1.0);
    }

    #[test]
    fn test_x_label_only_on_integer_positions() {
        let names = vec!["Puzzle".to_string(), "RPG".to_string()];
        assert_eq!(x_label(&names, 0.0), "Puzzle");
        assert_eq!(x_label(&names, 1.0), "RPG");
        assert_eq!(x_label(&names, 0.5), "");
        assert_eq!(x_label(&names, 2.0), "");
        assert_eq!(x_label(&names, -1.0), "");
    }
}
