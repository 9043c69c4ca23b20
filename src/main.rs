mod app;
mod color;
mod state;
mod ui;

use app::GapExplorerApp;
use eframe::egui;
use sdg9_gap::DataSources;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let sources = DataSources::from_env();
    log::info!("Reading indicator tables from {}", sources.dir().display());
    let state = AppState::new(sources);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SDG 9 – Cross-country Gap Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(GapExplorerApp::new(state)))),
    )
}
