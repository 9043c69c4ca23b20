use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use sdg9_gap::analysis::advice::recommendations;
use sdg9_gap::{Comparison, GapError};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bottom panel – gap summary, data table and advice
// ---------------------------------------------------------------------------

pub fn summary_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Gap analysis");
    ui.separator();

    match &state.outcome {
        Some(Ok(comparison)) => {
            gap_line(ui, state, comparison);
            ui.add_space(6.0);
            ui.columns(2, |cols| {
                data_table(&mut cols[0], comparison);
                advice(&mut cols[1], state);
            });
        }
        Some(Err(e)) => no_data(ui, e),
        None => {}
    }
}

fn gap_line(ui: &mut Ui, state: &AppState, comparison: &Comparison) {
    let s = &comparison.summary;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(format!("As of {}, best:", s.year));
        ui.label(
            RichText::new(format!("{} ({:.1})", s.best_country, s.best_value))
                .strong()
                .color(state.color_map.color_for(&s.best_country)),
        );
        ui.label("worst:");
        ui.label(
            RichText::new(format!("{} ({:.1})", s.worst_country, s.worst_value))
                .strong()
                .color(state.color_map.color_for(&s.worst_country)),
        );
        ui.label("gap:");
        ui.label(RichText::new(format!("{:.1}", s.gap)).strong());
    });
}

fn no_data(ui: &mut Ui, err: &GapError) {
    let text = match err {
        GapError::Unresolved { .. } => "No data for this metric in any loaded table.",
        GapError::EmptyResult { .. } => "No data for the selected countries.",
        GapError::NoLatestValues { .. } => "The latest year has no values for the selected countries.",
        GapError::Load(_) => "The indicator tables could not be loaded.",
    };
    ui.label(RichText::new(text).color(Color32::YELLOW));
}

fn data_table(ui: &mut Ui, comparison: &Comparison) {
    ui.push_id("view_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(120.0))
            .column(Column::auto().at_least(50.0))
            .column(Column::auto().at_least(80.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Country");
                });
                header.col(|ui| {
                    ui.strong("Year");
                });
                header.col(|ui| {
                    ui.strong(comparison.metric_label());
                });
            })
            .body(|mut body| {
                for row in &comparison.view.rows {
                    body.row(18.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(&row.country);
                        });
                        table_row.col(|ui| {
                            ui.label(row.year.to_string());
                        });
                        table_row.col(|ui| {
                            match row.value(&comparison.metric) {
                                Some(v) => ui.label(format!("{v:.2}")),
                                None => ui.weak("–"),
                            };
                        });
                    });
                }
            });
    });
}

fn advice(ui: &mut Ui, state: &AppState) {
    ui.strong("Recommendations");
    ScrollArea::vertical()
        .id_salt("advice")
        .show(ui, |ui: &mut Ui| {
            for line in recommendations(state.metric) {
                ui.label(format!("• {line}"));
            }
        });
}
