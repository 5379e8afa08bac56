use std::collections::{BTreeMap, HashMap};

use super::model::{Catalog, CatalogEntry};

/// How many entries the top-country / top-genre charts show.
pub const TOP_N: usize = 10;

/// How many countries the country multi-select offers.
pub const COUNTRY_OPTIONS: usize = 15;

// ---------------------------------------------------------------------------
// Independent read-only aggregations over a filtered view
// ---------------------------------------------------------------------------
//
// Every function takes the immutable catalog plus a list of row indices
// (the filtered view) and produces a fresh derived value.  Zero indices is
// a valid input and yields an empty result, never an error.

/// Number of titles added per known `year_added`, ascending by year.
pub fn additions_per_year(catalog: &Catalog, indices: &[usize]) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &i in indices {
        if let Some(y) = catalog.entries[i].year_added {
            *counts.entry(y).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

/// Counts per `kind`, descending by count.
pub fn counts_by_kind(catalog: &Catalog, indices: &[usize]) -> Vec<(String, usize)> {
    value_counts(catalog, indices, |e| Some(e.kind.as_str()))
}

/// The `TOP_N` most frequent `main_country` values.
pub fn top_countries(catalog: &Catalog, indices: &[usize]) -> Vec<(String, usize)> {
    let mut counts = value_counts(catalog, indices, |e| e.main_country.as_deref());
    counts.truncate(TOP_N);
    counts
}

/// The `TOP_N` most frequent `main_genre` values.
pub fn top_genres(catalog: &Catalog, indices: &[usize]) -> Vec<(String, usize)> {
    let mut counts = value_counts(catalog, indices, |e| e.main_genre.as_deref());
    counts.truncate(TOP_N);
    counts
}

/// The `COUNTRY_OPTIONS` most frequent countries of the *full* table,
/// used to populate the country multi-select.
pub fn country_options(catalog: &Catalog) -> Vec<String> {
    let all: Vec<usize> = (0..catalog.len()).collect();
    let mut counts = value_counts(catalog, &all, |e| e.main_country.as_deref());
    counts.truncate(COUNTRY_OPTIONS);
    counts.into_iter().map(|(c, _)| c).collect()
}

/// Frequency table of a categorical accessor, descending by count.
///
/// Unknown (`None`) values are skipped.  Ties keep first-encountered order:
/// the table is built in encounter order and sorted with a stable sort.
pub fn value_counts<'a, F>(
    catalog: &'a Catalog,
    indices: &[usize],
    accessor: F,
) -> Vec<(String, usize)>
where
    F: Fn(&'a CatalogEntry) -> Option<&'a str>,
{
    let mut table: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for &i in indices {
        let Some(value) = accessor(&catalog.entries[i]) else {
            continue;
        };
        match positions.get(value) {
            Some(&pos) => table[pos].1 += 1,
            None => {
                positions.insert(value, table.len());
                table.push((value.to_string(), 1));
            }
        }
    }

    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// One point of the release-year vs year-added scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub release_year: i32,
    pub year_added: i32,
    pub kind: String,
}

/// Paired (release_year, year_added) values for rows where both are known,
/// tagged by kind for per-kind colouring.
pub fn release_vs_added(catalog: &Catalog, indices: &[usize]) -> Vec<ScatterPoint> {
    indices
        .iter()
        .filter_map(|&i| {
            let entry = &catalog.entries[i];
            match (entry.release_year, entry.year_added) {
                (Some(release_year), Some(year_added)) => Some(ScatterPoint {
                    release_year,
                    year_added,
                    kind: entry.kind.clone(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Indices reordered for the titles table: (year_added, release_year) both
/// descending, unknown years last.
pub fn table_order(catalog: &Catalog, indices: &[usize]) -> Vec<usize> {
    let mut ordered = indices.to_vec();
    ordered.sort_by_key(|&i| {
        let entry = &catalog.entries[i];
        (
            std::cmp::Reverse(entry.year_added.unwrap_or(i32::MIN)),
            std::cmp::Reverse(entry.release_year.unwrap_or(i32::MIN)),
        )
    });
    ordered
}
