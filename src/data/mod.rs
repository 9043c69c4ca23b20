//! Data layer: indicator tables, loading, resolution and filtering.
//!
//! Architecture:
//! ```text
//!  ourworldindata_sdg9 / sdr_scores / worldbank_sdg9  (.csv / .json / .parquet)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse files → IndicatorTable × 3, priority order
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  schema   │  metric key → serving SourceId
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ resolver  │  first table carrying the metric column
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  selected countries → filtered view
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod schema;
