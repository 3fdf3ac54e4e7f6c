//! price-scout - One-shot product price statistics CLI
//!
//! Submits a search job to the PriceAPI queue, polls it to completion,
//! and reduces the downloaded results to summary price statistics.

pub mod analysis;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod priceapi;

pub use analysis::{PriceBand, PriceReport};
pub use config::Config;
pub use error::PriceError;
