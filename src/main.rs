mod app;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::CarLensApp;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    // Optional CSV path as the single argument: load before the window
    // opens, so a malformed snapshot aborts startup with a diagnostic
    // naming the offending column.
    let mut app_state = AppState::default();
    if let Some(path) = std::env::args().nth(1) {
        let table = data::loader::load_csv(path.as_ref())
            .with_context(|| format!("loading {path}"))?;
        log::info!(
            "Loaded {} listings across {} brands",
            table.len(),
            table.brands.len()
        );
        app_state.set_table(table);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CarLens – Used Car Listings",
        options,
        Box::new(|_cc| Ok(Box::new(CarLensApp::with_state(app_state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
