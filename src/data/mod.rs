/// Data layer: core types, loading, filtering, summarising and export.
///
/// Architecture:
/// ```text
///  bank-additional-full.csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, age range, job / outcome index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  filter(age, jobs) → subset, summarize(y) → shares
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  subset → ';'-separated CSV / Parquet
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod summary;
