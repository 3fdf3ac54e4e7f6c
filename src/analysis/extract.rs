//! Extraction of plausible price samples from a raw result document.

use crate::priceapi::models::RawResults;
use tracing::debug;

/// Inclusive band of plausible prices.
///
/// Values outside the band are extraction noise: accessories, placeholders,
/// currency-unit mismatches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

impl PriceBand {
    /// Creates a band with the given inclusive bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if the value lies inside the band.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for PriceBand {
    fn default() -> Self {
        Self { min: 10.0, max: 10000.0 }
    }
}

/// Walks a result document and collects every valid price sample.
///
/// A document missing the top-level results collection yields an empty list,
/// not an error. Each item may contribute up to two samples (`price` and
/// `min_price`); malformed or out-of-band values are skipped silently. The
/// returned list carries no ordering guarantee.
pub fn extract_prices(doc: &RawResults, band: &PriceBand) -> Vec<f64> {
    let mut prices = Vec::new();

    let Some(results) = &doc.results else {
        debug!("Result document has no results collection");
        return prices;
    };

    for entry in results {
        let Some(content) = &entry.content else { continue };
        let Some(items) = &content.search_results else { continue };

        for item in items {
            for field in [&item.price, &item.min_price] {
                let Some(value) = field else { continue };
                let Some(price) = value.as_price() else { continue };
                if band.contains(price) {
                    prices.push(price);
                }
            }
        }
    }

    debug!("Extracted {} valid price samples", prices.len());
    prices
}
