/// Data layer: core types, loading/cleaning, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean file → Catalog (memoized per source)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<CatalogEntry>, derived fields, immutable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  kind / year-added / country predicates → indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  independent read-only views for the charts/table
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
