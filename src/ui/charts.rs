use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::data::aggregate;
use crate::data::model::Catalog;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

/// Explicit notice rendered instead of a blank chart.
fn no_data(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current selection.").weak());
}

// ---------------------------------------------------------------------------
// Overview tab – additions per year + kind counts
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &AppState, catalog: &Catalog) {
    ui.heading("Additions per year");
    let per_year = aggregate::additions_per_year(catalog, &state.visible_indices);
    if per_year.is_empty() {
        no_data(ui);
    } else {
        let points: PlotPoints = per_year
            .iter()
            .map(|&(year, count)| [year as f64, count as f64])
            .collect();
        Plot::new("additions_per_year")
            .height(CHART_HEIGHT)
            .x_axis_label("Year added")
            .y_axis_label("Titles")
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).name("titles added").width(2.0));
            });
    }

    ui.separator();

    ui.heading("Content types");
    let by_kind = aggregate::counts_by_kind(catalog, &state.visible_indices);
    category_bar_chart(ui, "kind_counts", &by_kind);
}

// ---------------------------------------------------------------------------
// Countries & Genres tab – two top-10 bar charts
// ---------------------------------------------------------------------------

pub fn countries_genres(ui: &mut Ui, state: &AppState, catalog: &Catalog) {
    let countries = aggregate::top_countries(catalog, &state.visible_indices);
    let genres = aggregate::top_genres(catalog, &state.visible_indices);

    ui.columns(2, |columns| {
        columns[0].heading("Top countries");
        category_bar_chart(&mut columns[0], "top_countries", &countries);

        columns[1].heading("Top genres");
        category_bar_chart(&mut columns[1], "top_genres", &genres);
    });
}

/// Bar chart over (label, count) pairs, one bar per category.
fn category_bar_chart(ui: &mut Ui, id: &str, counts: &[(String, usize)]) {
    if counts.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Bar::new(i as f64, *count as f64).name(label))
        .collect();
    let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .y_axis_label("Titles")
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels
                .get(rounded as usize)
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6));
        });
}

// ---------------------------------------------------------------------------
// Release vs Added tab – scatter coloured by kind
// ---------------------------------------------------------------------------

pub fn release_vs_added(ui: &mut Ui, state: &AppState, catalog: &Catalog) {
    ui.heading("Release year vs year added");
    let points = aggregate::release_vs_added(catalog, &state.visible_indices);
    if points.is_empty() {
        no_data(ui);
        return;
    }

    Plot::new("release_vs_added")
        .height(CHART_HEIGHT * 1.6)
        .legend(Legend::default())
        .x_axis_label("Release year")
        .y_axis_label("Year added")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // One series per kind so the legend doubles as a colour key.
            for kind in &catalog.kinds {
                let series: PlotPoints = points
                    .iter()
                    .filter(|p| &p.kind == kind)
                    .map(|p| [p.release_year as f64, p.year_added as f64])
                    .collect();
                plot_ui.points(
                    Points::new(series)
                        .name(kind)
                        .color(state.kind_colors.color_for(kind))
                        .shape(MarkerShape::Circle)
                        .radius(3.0),
                );
            }
        });
}
