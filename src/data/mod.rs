/// Data layer: player records, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<PlayerRecord>, immutable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  countries + age range → ordered row indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
