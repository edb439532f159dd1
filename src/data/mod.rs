/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  URL / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site / category index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload range → matching records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  success counts (pie), projected points (scatter)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
