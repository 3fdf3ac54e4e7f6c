//! Price extraction and summary statistics.

pub mod extract;
pub mod stats;

pub use extract::{extract_prices, PriceBand};
pub use stats::PriceReport;
