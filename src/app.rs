use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, summary};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GapExplorerApp {
    pub state: AppState,
}

impl GapExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GapExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        if let Some(msg) = &self.state.fatal_message {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::fatal_message(ui, msg, self.state.session.sources());
            });
            return;
        }

        // ---- Left side panel: metric and countries ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: gap summary, data, advice ----
        egui::TopBottomPanel::bottom("summary_panel")
            .default_height(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                summary::summary_panel(ui, &self.state);
            });

        // ---- Central panel: indicator chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::indicator_plot(ui, &self.state);
        });
    }
}
