use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Price range ----
            ui.strong("Price range");
            let (price_min, price_max) = table.price_bounds;
            ui.add(
                Slider::new(&mut state.params.price_range.0, price_min..=price_max)
                    .text("min"),
            );
            ui.add(
                Slider::new(&mut state.params.price_range.1, price_min..=price_max)
                    .text("max"),
            );
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Histogram bins");
                ui.add(egui::DragValue::new(&mut state.params.price_bins).range(10..=1000));
            });
            ui.separator();

            // ---- Brand multi-select ----
            let n_selected = state.params.brands.len();
            let n_total = table.brands.len();
            ui.strong(format!("Brands  ({n_selected}/{n_total})"));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_brands();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_brands();
                }
            });
            for brand in &table.brands {
                let mut checked = state.params.brands.contains(brand);
                let text = RichText::new(brand).color(state.brand_colors.color_for(brand));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_brand(brand);
                }
            }
            ui.separator();

            // ---- Posting date range ----
            ui.strong("Posting dates");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                ui.add(
                    DatePickerButton::new(&mut state.params.date_range.0)
                        .id_salt("start_date"),
                );
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("To");
                ui.add(
                    DatePickerButton::new(&mut state.params.date_range.1)
                        .id_salt("end_date"),
                );
            });
        });

    // One full pipeline re-run per interaction; the scans are linear and
    // cheap, so recomputing every frame keeps the views trivially fresh.
    state.refresh();
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

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} listings, {} brands",
                table.len(),
                table.brands.len()
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
        .set_title("Open listings snapshot")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_csv(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} listings across {} brands",
                    table.len(),
                    table.brands.len()
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
