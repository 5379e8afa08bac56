use std::collections::BTreeSet;

use super::model::Catalog;

// ---------------------------------------------------------------------------
// Filter criteria: kind selection, year-added range, country selection
// ---------------------------------------------------------------------------

/// The three user-chosen filter criteria.
///
/// * `kinds` – allowed `type` values.  An empty set means nothing is
///   selected, so no row passes (multiselect semantics).
/// * `year_range` – inclusive `year_added` bounds.  Rows with an unknown
///   `year_added` never pass a range check.
/// * `countries` – allowed `main_country` values.  An empty set means
///   *no country restriction*; this is the documented default at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub kinds: BTreeSet<String>,
    pub year_range: (i32, i32),
    pub countries: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            kinds: BTreeSet::new(),
            year_range: FALLBACK_YEAR_RANGE,
            countries: BTreeSet::new(),
        }
    }
}

/// Year bounds used when no row has a known `year_added`.
pub const FALLBACK_YEAR_RANGE: (i32, i32) = (2000, 2025);

/// Initialise a [`FilterState`] that shows everything: all kinds selected,
/// the full year range of the table, and no country restriction.
pub fn init_filter_state(catalog: &Catalog) -> FilterState {
    FilterState {
        kinds: catalog.kinds.iter().cloned().collect(),
        year_range: catalog.year_added_bounds().unwrap_or(FALLBACK_YEAR_RANGE),
        countries: BTreeSet::new(),
    }
}

/// Return indices of entries that pass all three filters.
///
/// The predicates are conjunctive and independent, so their application
/// order cannot affect the result, and re-filtering an already filtered
/// view with the same criteria is a no-op.
pub fn filtered_indices(catalog: &Catalog, filters: &FilterState) -> Vec<usize> {
    let (lo, hi) = filters.year_range;

    catalog
        .entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            if !filters.kinds.contains(&entry.kind) {
                return false;
            }
            match entry.year_added {
                Some(y) if y >= lo && y <= hi => {}
                _ => return false,
            }
            if !filters.countries.is_empty() {
                match &entry.main_country {
                    Some(c) if filters.countries.contains(c) => {}
                    _ => return false,
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CatalogEntry;

    fn entry(kind: &str, year_added: Option<i32>, country: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            title: "t".to_string(),
            kind: kind.to_string(),
            country: country.map(|c| c.to_string()),
            listed_in: None,
            release_year: None,
            date_added: None,
            rating: None,
            duration: None,
            main_country: country.map(|c| c.to_string()),
            main_genre: None,
            year_added,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::from_entries(vec![
            entry("Movie", Some(2019), Some("France")),
            entry("Movie", Some(2020), Some("Spain")),
            entry("Movie", Some(2021), None),
            entry("TV Show", Some(2019), Some("France")),
            entry("TV Show", None, Some("Spain")),
        ])
    }

    #[test]
    fn all_selected_keeps_rows_with_known_year() {
        let catalog = sample_catalog();
        let filters = init_filter_state(&catalog);
        // Row 4 has an unknown year_added and is excluded from any
        // range-bounded view.
        assert_eq!(filtered_indices(&catalog, &filters), vec![0, 1, 2, 3]);
    }

    #[test]
    fn kind_filter() {
        let catalog = sample_catalog();
        let mut filters = init_filter_state(&catalog);
        filters.kinds = ["Movie".to_string()].into();
        assert_eq!(filtered_indices(&catalog, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn empty_kind_selection_yields_no_rows() {
        let catalog = sample_catalog();
        let mut filters = init_filter_state(&catalog);
        filters.kinds.clear();
        assert!(filtered_indices(&catalog, &filters).is_empty());
    }

    #[test]
    fn year_range_is_inclusive() {
        let catalog = sample_catalog();
        let mut filters = init_filter_state(&catalog);
        filters.year_range = (2019, 2020);
        assert_eq!(filtered_indices(&catalog, &filters), vec![0, 1, 3]);
    }

    #[test]
    fn empty_country_selection_means_no_restriction() {
        let catalog = sample_catalog();
        let mut filters = init_filter_state(&catalog);
        filters.countries.clear();
        assert_eq!(filtered_indices(&catalog, &filters).len(), 4);
    }

    #[test]
    fn country_filter_excludes_unknown_country() {
        let catalog = sample_catalog();
        let mut filters = init_filter_state(&catalog);
        filters.countries = ["France".to_string()].into();
        // Row 2 (no country) and Spain rows drop out.
        assert_eq!(filtered_indices(&catalog, &filters), vec![0, 3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = sample_catalog();
        let mut filters = init_filter_state(&catalog);
        filters.kinds = ["Movie".to_string()].into();
        filters.year_range = (2019, 2020);

        let once = filtered_indices(&catalog, &filters);
        let narrowed = Catalog::from_entries(
            once.iter().map(|&i| catalog.entries[i].clone()).collect(),
        );
        let twice = filtered_indices(&narrowed, &filters);
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }

    #[test]
    fn predicate_order_does_not_matter() {
        // Apply each predicate on its own, in both orders, and compare
        // with the conjunctive result.
        let catalog = sample_catalog();
        let mut filters = init_filter_state(&catalog);
        filters.kinds = ["Movie".to_string(), "TV Show".to_string()].into();
        filters.year_range = (2019, 2019);
        filters.countries = ["France".to_string()].into();

        let combined = filtered_indices(&catalog, &filters);

        let mut only_kind = init_filter_state(&catalog);
        only_kind.kinds = filters.kinds.clone();
        let mut only_year = init_filter_state(&catalog);
        only_year.year_range = filters.year_range;
        let mut only_country = init_filter_state(&catalog);
        only_country.countries = filters.countries.clone();

        let a: Vec<usize> = filtered_indices(&catalog, &only_kind)
            .into_iter()
            .filter(|i| filtered_indices(&catalog, &only_year).contains(i))
            .filter(|i| filtered_indices(&catalog, &only_country).contains(i))
            .collect();
        let b: Vec<usize> = filtered_indices(&catalog, &only_country)
            .into_iter()
            .filter(|i| filtered_indices(&catalog, &only_kind).contains(i))
            .filter(|i| filtered_indices(&catalog, &only_year).contains(i))
            .collect();

        assert_eq!(a, combined);
        assert_eq!(b, combined);
    }
}
