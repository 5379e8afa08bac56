use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::KindColors;
use crate::data::aggregate;
use crate::data::filter::{FALLBACK_YEAR_RANGE, FilterState, filtered_indices, init_filter_state};
use crate::data::loader::CatalogCache;
use crate::data::model::Catalog;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which central view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    CountriesGenres,
    ReleaseVsAdded,
    Titles,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Overview,
        Tab::CountriesGenres,
        Tab::ReleaseVsAdded,
        Tab::Titles,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::CountriesGenres => "Countries & Genres",
            Tab::ReleaseVsAdded => "Release vs Added",
            Tab::Titles => "Titles",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized loader; re-opening the same unchanged file is free.
    pub cache: CatalogCache,

    /// Path of the currently loaded source, if any.
    pub source_path: Option<PathBuf>,

    /// Cleaned catalog (None until the user loads a file).
    pub catalog: Option<Arc<Catalog>>,

    /// Current filter criteria.
    pub filters: FilterState,

    /// Known year_added bounds of the full table (slider limits).
    pub year_bounds: (i32, i32),

    /// Country multi-select options: top countries of the full table.
    pub country_options: Vec<String>,

    /// Indices of entries passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Colour per kind for the scatter plot.
    pub kind_colors: KindColors,

    /// Active central tab.
    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: CatalogCache::default(),
            source_path: None,
            catalog: None,
            filters: FilterState::default(),
            year_bounds: FALLBACK_YEAR_RANGE,
            country_options: Vec::new(),
            visible_indices: Vec::new(),
            kind_colors: KindColors::default(),
            active_tab: Tab::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load (or re-load from cache) the file at `path` and ingest it.
    pub fn load_path(&mut self, path: &Path) {
        match self.cache.load(path) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} titles ({} kinds) from {}",
                    catalog.len(),
                    catalog.kinds.len(),
                    path.display()
                );
                self.source_path = Some(path.to_path_buf());
                self.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded catalog and initialise filters, options and
    /// colours from the full unfiltered table.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        self.filters = init_filter_state(&catalog);
        self.year_bounds = self.filters.year_range;
        self.country_options = aggregate::country_options(&catalog);
        self.kind_colors = KindColors::new(&catalog.kinds);
        self.visible_indices = (0..catalog.len()).collect();

        self.catalog = Some(catalog);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.visible_indices = filtered_indices(catalog, &self.filters);
        }
    }

    /// Toggle one kind in the type filter.
    pub fn toggle_kind(&mut self, kind: &str) {
        if !self.filters.kinds.remove(kind) {
            self.filters.kinds.insert(kind.to_string());
        }
        self.refilter();
    }

    /// Toggle one country in the country filter.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.filters.countries.remove(country) {
            self.filters.countries.insert(country.to_string());
        }
        self.refilter();
    }

    /// Select all kinds.
    pub fn select_all_kinds(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.filters.kinds = catalog.kinds.iter().cloned().collect();
            self.refilter();
        }
    }

    /// Deselect all kinds (hides every row).
    pub fn select_no_kinds(&mut self) {
        self.filters.kinds = BTreeSet::new();
        self.refilter();
    }

    /// Clear the country selection, which means "no country restriction".
    pub fn clear_countries(&mut self) {
        self.filters.countries = BTreeSet::new();
        self.refilter();
    }

    /// Set the inclusive year range, clamped to the table bounds and kept
    /// non-inverted.
    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        let (min, max) = self.year_bounds;
        let lo = lo.clamp(min, max);
        let hi = hi.clamp(min, max);
        self.filters.year_range = (lo.min(hi), lo.max(hi));
        self.refilter();
    }
}
