//! Data-to-geometry transforms feeding the chart builders.
//!
//! These are the pieces with actual logic: category-axis completion
//! filtering, aligned series extraction, first/last trend classification,
//! and before/after pair alignment. Everything downstream is draw calls.

mod category;
mod pair;
mod trend;

pub use category::CategoryAxis;
pub use pair::{align_pairs, PairedSeries};
pub use trend::{classify_series, Trend, TrendPalette};
