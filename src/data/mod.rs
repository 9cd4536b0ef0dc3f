/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  results/*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Series, group by filename token
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ SeriesCollection  │  Vec<Series>, fixed order and groups
///   └──────────────────┘
/// ```

pub mod loader;
pub mod model;
