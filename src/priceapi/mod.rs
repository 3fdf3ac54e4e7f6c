//! PriceAPI-specific modules for the HTTP client and wire data models.

pub mod client;
pub mod models;

pub use client::{await_completion, JobApi, PriceApiClient};
pub use models::{JobState, RawResults};
