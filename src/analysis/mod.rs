//! Derived views of a filtered indicator table: the latest-year gap summary,
//! chart series and the advice shown beside them.

pub mod advice;
pub mod gap;
pub mod series;
