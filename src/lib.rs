//! Cross-country gap analysis for SDG 9 development indicators.
//!
//! Three independently sourced indicator tables are loaded once per
//! [`Session`]. A metric key is resolved to the first table (in
//! [`SourceId::PRIORITY`] order) carrying it, the rows are narrowed to the
//! selected countries, and the latest year of that view is summarised as a
//! [`GapSummary`].
//!
//! ```no_run
//! use std::collections::BTreeSet;
//! use sdg9_gap::{DataSources, Metric, Session};
//!
//! let mut session = Session::new(DataSources::from_env());
//! let countries: BTreeSet<String> = ["Korea, Rep.", "Kenya"].map(String::from).into();
//! let comparison = session.compare(Metric::ManufacturingValueAdded.key(), &countries)?;
//! println!("{}", comparison.summary);
//! # Ok::<(), sdg9_gap::GapError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod session;

pub use analysis::gap::{analyze, GapSummary};
pub use config::{default_selection, DataSources, DEFAULT_COUNTRIES};
pub use data::model::{IndicatorRow, IndicatorTable, Metric, SourceId};
pub use error::{GapError, LoadError};
pub use session::{Catalog, Comparison, Session};
