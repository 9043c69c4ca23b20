use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use sdg9_gap::{DataSources, Metric};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – metric and country selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Indicator");
    ui.separator();

    let mut chosen = state.metric;
    egui::ComboBox::from_id_salt("metric")
        .selected_text(chosen.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in Metric::ALL {
                ui.selectable_value(&mut chosen, metric, metric.label());
            }
        });
    state.set_metric(chosen);

    ui.add_space(8.0);
    ui.heading("Countries");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
        ui.label(format!("{}/{}", state.selection.len(), state.countries.len()));
    });
    ui.add(egui::TextEdit::singleline(&mut state.country_query).hint_text("Search…"));

    // Clone what we need so we can mutate state after the loop.
    let countries = state.visible_countries();
    let mut toggled: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for country in &countries {
                let mut checked = state.selection.contains(country);
                let text = RichText::new(country).color(state.color_map.color_for(country));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(country.clone());
                }
            }
        });

    if let Some(country) = toggled {
        state.toggle_country(&country);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("SDG 9 cross-country gap");
        ui.separator();

        match &state.outcome {
            Some(Ok(comparison)) => {
                ui.label(format!(
                    "{} from {} · {} rows",
                    comparison.metric_label(),
                    comparison.source,
                    comparison.view.len()
                ));
                if !comparison.shadowed.is_empty() {
                    let others: Vec<&str> =
                        comparison.shadowed.iter().map(|s| s.label()).collect();
                    ui.weak(format!("(also in {})", others.join(", ")))
                        .on_hover_text("Lower-priority sources; their values are not used.");
                }
            }
            Some(Err(e)) => {
                ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Load failure
// ---------------------------------------------------------------------------

/// Blocking message shown instead of the dashboard when loading failed.
pub fn fatal_message(ui: &mut Ui, message: &str, sources: &DataSources) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(RichText::new(message).color(Color32::RED));
            ui.label(format!(
                "Expected {}, {} and {} (.csv, .json or .parquet) in {} \
                 (set SDG9_DATA_DIR to change).",
                sdg9_gap::SourceId::OurWorldInData.file_stem(),
                sdg9_gap::SourceId::SdrScores.file_stem(),
                sdg9_gap::SourceId::WorldBank.file_stem(),
                sources.dir().display()
            ));
        });
    });
}
