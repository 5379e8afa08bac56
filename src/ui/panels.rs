use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let catalog = match &state.catalog {
        Some(c) => c,
        None => {
            ui.label("No catalog loaded.");
            return;
        }
    };

    // Clone the option lists so we can mutate state inside the loop.
    let kinds = catalog.kinds.clone();
    let countries = state.country_options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Content type ----
            ui.strong("Content type");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_kinds();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_kinds();
                }
            });
            for kind in &kinds {
                let mut checked = state.filters.kinds.contains(kind);
                if ui.checkbox(&mut checked, kind).changed() {
                    state.toggle_kind(kind);
                }
            }
            ui.separator();

            // ---- Year added range ----
            ui.strong("Year added");
            let (min, max) = state.year_bounds;
            let (mut lo, mut hi) = state.filters.year_range;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("From");
                let lo_changed = ui
                    .add(DragValue::new(&mut lo).range(min..=max))
                    .changed();
                ui.label("to");
                let hi_changed = ui
                    .add(DragValue::new(&mut hi).range(min..=max))
                    .changed();
                if lo_changed || hi_changed {
                    state.set_year_range(lo, hi);
                }
            });
            ui.label(
                RichText::new("Titles without a known year added are hidden.")
                    .small()
                    .weak(),
            );
            ui.separator();

            // ---- Country (optional) ----
            let n_selected = state.filters.countries.len();
            let header = if n_selected == 0 {
                "Country (all)".to_string()
            } else {
                format!("Country ({n_selected} selected)")
            };
            ui.strong(header);
            if ui.small_button("Clear").clicked() {
                state.clear_countries();
            }
            ui.label(
                RichText::new("Empty selection means no country restriction.")
                    .small()
                    .weak(),
            );
            for country in &countries {
                let mut checked = state.filters.countries.contains(country);
                if ui.checkbox(&mut checked, country).changed() {
                    state.toggle_country(country);
                }
            }
        });
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
            if state.source_path.is_some() && ui.button("Reload").clicked() {
                if let Some(path) = state.source_path.clone() {
                    state.load_path(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} titles loaded, {} after filters",
                catalog.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
