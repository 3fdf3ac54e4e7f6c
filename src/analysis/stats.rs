//! Summary statistics over extracted price samples.

use serde::{Deserialize, Serialize};

/// Aggregate price statistics for one product query.
///
/// Built once per successful run. `prices` is sorted ascending and
/// `count == prices.len()`; all statistics are rounded to 2 decimal places.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceReport {
    /// Product name the query was run for
    pub product: String,
    /// Number of valid samples
    pub count: usize,
    /// Arithmetic mean
    pub average: f64,
    /// Median (average-of-two-middles for even counts)
    pub median: f64,
    /// Lowest sample
    pub min: f64,
    /// Highest sample
    pub max: f64,
    /// All samples, sorted ascending
    pub prices: Vec<f64>,
}

impl PriceReport {
    /// Builds a report from raw samples, or `None` if there are no samples.
    ///
    /// "No data" is deliberately not an error here: the caller decides how to
    /// surface it, distinct from any transport failure.
    pub fn from_samples(product: impl Into<String>, mut samples: Vec<f64>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        samples.sort_by(|a, b| a.total_cmp(b));

        let count = samples.len();
        let sum: f64 = samples.iter().sum();

        Some(Self {
            product: product.into(),
            count,
            average: round2(sum / count as f64),
            median: round2(median_of_sorted(&samples)),
            min: round2(samples[0]),
            max: round2(samples[count - 1]),
            prices: samples,
        })
    }
}

/// Median of an ascending-sorted, non-empty slice.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Rounds to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
