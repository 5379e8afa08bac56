use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate;
use crate::data::model::{Catalog, display_or_unknown, display_year};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Titles tab – projection of the filtered rows
// ---------------------------------------------------------------------------

const HEADERS: [&str; 8] = [
    "Title",
    "Type",
    "Genre",
    "Country",
    "Release year",
    "Year added",
    "Rating",
    "Duration",
];

/// Render the filtered titles sorted by (year_added, release_year), both
/// descending.
pub fn titles_table(ui: &mut Ui, state: &AppState, catalog: &Catalog) {
    ui.heading("Filtered titles");

    let ordered = aggregate::table_order(catalog, &state.visible_indices);
    if ordered.is_empty() {
        ui.label(RichText::new("No data for the current selection.").weak());
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(140.0))
        .columns(Column::auto().at_least(70.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, ordered.len(), |mut row| {
                let entry = &catalog.entries[ordered[row.index()]];
                row.col(|ui| {
                    ui.label(&entry.title);
                });
                row.col(|ui| {
                    ui.label(&entry.kind);
                });
                row.col(|ui| {
                    ui.label(display_or_unknown(entry.main_genre.as_deref()));
                });
                row.col(|ui| {
                    ui.label(display_or_unknown(entry.main_country.as_deref()));
                });
                row.col(|ui| {
                    ui.label(display_year(entry.release_year));
                });
                row.col(|ui| {
                    ui.label(display_year(entry.year_added));
                });
                row.col(|ui| {
                    ui.label(display_or_unknown(entry.rating.as_deref()));
                });
                row.col(|ui| {
                    ui.label(display_or_unknown(entry.duration.as_deref()));
                });
            });
        });
}
