use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CatalogEntry – one row of the source table
// ---------------------------------------------------------------------------

/// A single catalog entry (one row of the source file) after cleaning.
///
/// Raw fields keep their source text; derived fields (`main_country`,
/// `main_genre`, `year_added`) are computed exactly once by the loader and
/// never mutated afterwards. `None` is the unknown sentinel for anything
/// that was absent or failed to parse.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub title: String,
    /// The source `type` column ("Movie", "TV Show", ...).
    pub kind: String,
    /// Raw country field, possibly several comma-separated values.
    pub country: Option<String>,
    /// Raw genre list (`listed_in`), comma-separated.
    pub listed_in: Option<String>,
    pub release_year: Option<i32>,
    pub date_added: Option<NaiveDate>,
    pub rating: Option<String>,
    pub duration: Option<String>,

    /// First comma-separated token of `country`, trimmed.
    pub main_country: Option<String>,
    /// First comma-separated token of `listed_in`, trimmed.
    pub main_genre: Option<String>,
    /// Calendar year of `date_added`.
    pub year_added: Option<i32>,
}

/// Label used when rendering an unknown (`None`) field.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Render an optional text field, falling back to the unknown label.
pub fn display_or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN_LABEL)
}

/// Render an optional year, falling back to the unknown label.
pub fn display_year(value: Option<i32>) -> String {
    match value {
        Some(y) => y.to_string(),
        None => UNKNOWN_LABEL.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete cleaned table
// ---------------------------------------------------------------------------

/// The full cleaned dataset, immutable for the session.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All entries (rows).
    pub entries: Vec<CatalogEntry>,
    /// Sorted distinct `kind` values present in the table.
    pub kinds: Vec<String>,
}

impl Catalog {
    /// Build the kind index from the cleaned entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let kinds_set: BTreeSet<String> = entries.iter().map(|e| e.kind.clone()).collect();
        Catalog {
            entries,
            kinds: kinds_set.into_iter().collect(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Min and max known `year_added` across the whole table, or `None`
    /// when no row has a known year.
    pub fn year_added_bounds(&self) -> Option<(i32, i32)> {
        let mut bounds: Option<(i32, i32)> = None;
        for entry in &self.entries {
            if let Some(y) = entry.year_added {
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(y), hi.max(y)),
                    None => (y, y),
                });
            }
        }
        bounds
    }
}
