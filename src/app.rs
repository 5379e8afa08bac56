use std::path::PathBuf;

use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CatalogLensApp {
    pub state: AppState,
}

impl CatalogLensApp {
    /// Create the app, optionally loading a catalog right away.
    pub fn new(initial_path: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = initial_path {
            state.load_path(&path);
        }
        Self { state }
    }
}

impl eframe::App for CatalogLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(catalog) = self.state.catalog.clone() else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a catalog file to explore it  (File → Open…)");
                });
                return;
            };

            ui.horizontal(|ui: &mut egui::Ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.active_tab, tab, tab.label());
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut egui::Ui| match self.state.active_tab {
                    Tab::Overview => charts::overview(ui, &self.state, &catalog),
                    Tab::CountriesGenres => {
                        charts::countries_genres(ui, &self.state, &catalog)
                    }
                    Tab::ReleaseVsAdded => {
                        charts::release_vs_added(ui, &self.state, &catalog)
                    }
                    Tab::Titles => table::titles_table(ui, &self.state, &catalog),
                });
        });
    }
}
