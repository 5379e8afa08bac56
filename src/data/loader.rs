use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Catalog, CatalogEntry, UNKNOWN_LABEL};

/// Date layout of the source `date_added` column ("September 25, 2021").
const DATE_ADDED_FORMAT: &str = "%B %d, %Y";

/// Columns that must exist (after header normalization) for the load to
/// succeed.  Missing any of these is fatal; malformed values inside a
/// present column are recovered per-row.
const REQUIRED_COLUMNS: &[&str] = &[
    "title",
    "type",
    "country",
    "listed_in",
    "date_added",
    "release_year",
    "rating",
    "duration",
];

/// Fatal load-time failures.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required column '{0}' (after header normalization)")]
    MissingColumn(String),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Pure cleaning helpers
// ---------------------------------------------------------------------------

/// Normalize a header name: trim, lower-case, spaces → underscores.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// First comma-separated token of a delimited text field, trimmed.
/// Empty or whitespace-only input yields `None` (the unknown sentinel).
pub fn first_value(raw: &str) -> Option<String> {
    let first = raw.split(',').next().unwrap_or("").trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Parse a `date_added` value against the single expected layout.
/// Anything that does not match yields `None`, never an error.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_ADDED_FORMAT).ok()
}

/// Trimmed cell text, `None` for empty cells.
fn opt_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Raw cell values of one source row, before cleaning.
#[derive(Debug, Default)]
struct RawRow {
    title: Option<String>,
    kind: Option<String>,
    country: Option<String>,
    listed_in: Option<String>,
    release_year: Option<String>,
    date_added: Option<String>,
    rating: Option<String>,
    duration: Option<String>,
}

impl RawRow {
    /// Clean the row.  Derived fields are computed here, exactly once; the
    /// entry is immutable afterwards.
    fn clean(self) -> CatalogEntry {
        let date_added = self.date_added.as_deref().and_then(parse_date_added);
        let main_country = self.country.as_deref().and_then(first_value);
        let main_genre = self.listed_in.as_deref().and_then(first_value);
        let year_added = date_added.map(|d| d.year());

        CatalogEntry {
            title: self.title.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            kind: self.kind.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            country: self.country,
            listed_in: self.listed_in,
            release_year: self
                .release_year
                .and_then(|s| s.trim().parse::<i32>().ok()),
            date_added,
            rating: self.rating,
            duration: self.duration,
            main_country,
            main_genre,
            year_added,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row + one record per line (the canonical source)
/// * `.json` – records orientation: `[{ "title": ..., "type": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(normalize_header)
        .collect();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()).into())
    };

    let title_idx = column("title")?;
    let kind_idx = column("type")?;
    let country_idx = column("country")?;
    let listed_in_idx = column("listed_in")?;
    let date_added_idx = column("date_added")?;
    let release_year_idx = column("release_year")?;
    let rating_idx = column("rating")?;
    let duration_idx = column("duration")?;

    let mut entries = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| opt_text(record.get(idx).unwrap_or(""));

        let raw = RawRow {
            title: cell(title_idx),
            kind: cell(kind_idx),
            country: cell(country_idx),
            listed_in: cell(listed_in_idx),
            release_year: cell(release_year_idx),
            date_added: cell(date_added_idx),
            rating: cell(rating_idx),
            duration: cell(duration_idx),
        };
        entries.push(raw.clean());
    }

    Ok(Catalog::from_entries(entries))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "title": "Example",
///     "type": "Movie",
///     "country": "France, Spain",
///     "listed_in": "Dramas, International Movies",
///     "date_added": "January 5, 2019",
///     "release_year": 2017,
///     "rating": "PG-13",
///     "duration": "90 min"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    // Required columns are checked against the first record; later records
    // with absent keys degrade to unknown values like any malformed cell.
    if let Some(first) = records.first() {
        let obj = first.as_object().context("Row 0 is not a JSON object")?;
        let keys: Vec<String> = obj.keys().map(|k| normalize_header(k)).collect();
        for required in REQUIRED_COLUMNS {
            if !keys.iter().any(|k| k == required) {
                return Err(LoadError::MissingColumn(required.to_string()).into());
            }
        }
    }

    let mut entries = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let fields: BTreeMap<String, &JsonValue> = obj
            .iter()
            .map(|(k, v)| (normalize_header(k), v))
            .collect();
        let cell = |name: &str| fields.get(name).and_then(|v| json_to_text(v));

        let raw = RawRow {
            title: cell("title"),
            kind: cell("type"),
            country: cell("country"),
            listed_in: cell("listed_in"),
            release_year: cell("release_year"),
            date_added: cell("date_added"),
            rating: cell("rating"),
            duration: cell("duration"),
        };
        entries.push(raw.clean());
    }

    Ok(Catalog::from_entries(entries))
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => opt_text(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Memoized loading
// ---------------------------------------------------------------------------

/// Memoizes the (expensive) file load, keyed by source identity.
///
/// Repeated loads of the same unchanged file return the cached immutable
/// catalog without touching the disk again; the cache invalidates when the
/// path or its modification time changes.
#[derive(Default)]
pub struct CatalogCache {
    slot: Option<CacheSlot>,
}

struct CacheSlot {
    path: PathBuf,
    modified: Option<SystemTime>,
    catalog: Arc<Catalog>,
}

impl CatalogCache {
    pub fn load(&mut self, path: &Path) -> Result<Arc<Catalog>> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("reading metadata of {}", path.display()))?;
        if !metadata.is_file() {
            bail!("{} is not a regular file", path.display());
        }
        let modified = metadata.modified().ok();

        if let Some(slot) = &self.slot {
            if slot.path == path && slot.modified == modified {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(&slot.catalog));
            }
        }

        let catalog = Arc::new(load_file(path)?);
        self.slot = Some(CacheSlot {
            path: path.to_path_buf(),
            modified,
            catalog: Arc::clone(&catalog),
        });
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_CSV: &str = "\
show_id,type,title,country,date_added,release_year,rating,duration,listed_in
s1,Movie,Alpha,\"France, Spain\",\"January 5, 2019\",2017,PG-13,90 min,\"Dramas, Thrillers\"
s2,TV Show,Beta,Spain,\"March 12, 2021\",2020,TV-MA,2 Seasons,Comedies
s3,Movie,Gamma,,invalid,2015,R,100 min,\"Action, Dramas\"
";

    fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("Date Added"), "date_added");
        assert_eq!(normalize_header("  Release Year "), "release_year");
        assert_eq!(normalize_header("type"), "type");
    }

    #[test]
    fn first_value_takes_pre_comma_token() {
        assert_eq!(first_value("France, Spain"), Some("France".to_string()));
        assert_eq!(first_value("Spain"), Some("Spain".to_string()));
        assert_eq!(first_value("  Dramas , Thrillers"), Some("Dramas".to_string()));
        assert_eq!(first_value(""), None);
        assert_eq!(first_value("   "), None);
        assert_eq!(first_value(", Spain"), None);
    }

    #[test]
    fn date_parsing_single_layout() {
        assert_eq!(
            parse_date_added("January 5, 2019"),
            NaiveDate::from_ymd_opt(2019, 1, 5)
        );
        assert_eq!(
            parse_date_added("  September 25, 2021  "),
            NaiveDate::from_ymd_opt(2021, 9, 25)
        );
        assert_eq!(parse_date_added("invalid"), None);
        assert_eq!(parse_date_added("2019-01-05"), None);
        assert_eq!(parse_date_added(""), None);
    }

    #[test]
    fn csv_load_derives_fields_once() {
        let file = write_temp(SAMPLE_CSV, ".csv");
        let catalog = load_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.kinds, vec!["Movie", "TV Show"]);

        let alpha = &catalog.entries[0];
        assert_eq!(alpha.title, "Alpha");
        assert_eq!(alpha.main_country.as_deref(), Some("France"));
        assert_eq!(alpha.main_genre.as_deref(), Some("Dramas"));
        assert_eq!(alpha.year_added, Some(2019));
        assert_eq!(alpha.release_year, Some(2017));

        // Malformed date and absent country recover as unknown, never fatal.
        let gamma = &catalog.entries[2];
        assert_eq!(gamma.year_added, None);
        assert_eq!(gamma.date_added, None);
        assert_eq!(gamma.main_country, None);
        assert_eq!(gamma.main_genre.as_deref(), Some("Action"));
    }

    #[test]
    fn derived_fields_never_contain_commas() {
        let file = write_temp(SAMPLE_CSV, ".csv");
        let catalog = load_file(file.path()).unwrap();
        for entry in &catalog.entries {
            if let Some(c) = &entry.main_country {
                assert!(!c.contains(','), "main_country holds a comma: {c}");
            }
            if let Some(g) = &entry.main_genre {
                assert!(!g.contains(','), "main_genre holds a comma: {g}");
            }
        }
    }

    #[test]
    fn headers_are_normalized_before_lookup() {
        let csv = "\
Show Id,Type,Title,Country,Date Added,Release Year,Rating,Duration,Listed In
s1,Movie,Alpha,France,\"January 5, 2019\",2017,PG,90 min,Dramas
";
        let file = write_temp(csv, ".csv");
        let catalog = load_file(file.path()).unwrap();
        assert_eq!(catalog.entries[0].year_added, Some(2019));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "show_id,type,title\ns1,Movie,Alpha\n";
        let file = write_temp(csv, ".csv");
        let err = load_file(file.path()).unwrap_err();
        let load_err = err.downcast_ref::<LoadError>().unwrap();
        assert!(matches!(load_err, LoadError::MissingColumn(_)));
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_file(Path::new("/nonexistent/catalog.csv")).is_err());
    }

    #[test]
    fn unsupported_extension_is_fatal() {
        let file = write_temp("x", ".parquet");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"title": "Alpha", "type": "Movie", "country": "France, Spain",
             "listed_in": "Dramas", "date_added": "January 5, 2019",
             "release_year": 2017, "rating": "PG", "duration": "90 min"},
            {"title": "Beta", "type": "TV Show", "country": null,
             "listed_in": "Comedies", "date_added": null,
             "release_year": 2020, "rating": "TV-MA", "duration": "2 Seasons"}
        ]"#;
        let file = write_temp(json, ".json");
        let catalog = load_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries[0].main_country.as_deref(), Some("France"));
        assert_eq!(catalog.entries[1].main_country, None);
        assert_eq!(catalog.entries[1].year_added, None);
    }

    #[test]
    fn json_missing_column_is_fatal() {
        let json = r#"[{"title": "Alpha", "type": "Movie"}]"#;
        let file = write_temp(json, ".json");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn(_))
        ));
    }

    #[test]
    fn cache_returns_same_catalog_without_reread() {
        let file = write_temp(SAMPLE_CSV, ".csv");
        let mut cache = CatalogCache::default();

        let first = cache.load(file.path()).unwrap();
        let second = cache.load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn cache_misses_on_different_path() {
        let file_a = write_temp(SAMPLE_CSV, ".csv");
        let file_b = write_temp(SAMPLE_CSV, ".csv");
        let mut cache = CatalogCache::default();

        let a = cache.load(file_a.path()).unwrap();
        let b = cache.load(file_b.path()).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
