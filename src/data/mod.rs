/// Data layer: core types, loading, preparation, and derived views.
///
/// Architecture:
/// ```text
///      .csv snapshot
///           │
///           ▼
///     ┌──────────┐
///     │  loader   │  schema check → Vec<RawListing>
///     └──────────┘
///           │
///           ▼
///     ┌──────────┐
///     │ prepare   │  impute / coerce / derive → ListingTable
///     └──────────┘
///           │
///           ▼
///     ┌──────────┐
///     │ pipeline  │  filters + aggregates → per-render derived views
///     └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod pipeline;
pub mod prepare;
