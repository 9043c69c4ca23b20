use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use sdg9_gap::analysis::series::series_by_country;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Indicator chart (central panel)
// ---------------------------------------------------------------------------

/// Line chart of the filtered view: one line per country, x = year.
pub fn indicator_plot(ui: &mut Ui, state: &AppState) {
    let comparison = match &state.outcome {
        Some(Ok(comparison)) => comparison,
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Nothing to chart for this metric and selection.");
            });
            return;
        }
    };

    let series = series_by_country(&comparison.view, &comparison.metric);

    Plot::new("indicator_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(comparison.metric_label())
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in &series {
                let color = state.color_map.color_for(&s.country);
                let coords: Vec<[f64; 2]> = s
                    .points
                    .iter()
                    .map(|&(year, value)| [year as f64, value])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(coords.clone()))
                        .name(&s.country)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .name(&s.country)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}
