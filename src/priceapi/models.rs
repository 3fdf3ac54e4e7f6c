//! Wire data models for PriceAPI job responses.

use serde::Deserialize;

/// Response to a job creation request.
#[derive(Debug, Deserialize)]
pub struct JobCreated {
    /// Job identifier assigned by the service, if any.
    pub job_id: Option<String>,
}

/// Response to a job status check.
#[derive(Debug, Deserialize)]
pub struct JobStatusResponse {
    /// Raw status string ("finished", "failed", "working", ...).
    pub status: Option<String>,
}

impl JobStatusResponse {
    /// Maps the raw status string onto the client-side job lifecycle.
    pub fn state(&self) -> JobState {
        match self.status.as_deref() {
            Some("finished") => JobState::Finished,
            Some("failed") => JobState::Failed,
            Some(other) => JobState::Running(other.to_string()),
            None => JobState::Running("unknown".to_string()),
        }
    }
}

/// Client-side view of a job's lifecycle.
///
/// `Running` keeps the raw status string for narration; anything the service
/// reports that is neither "finished" nor "failed" counts as in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Finished,
    Failed,
    Running(String),
}

/// Downloaded result document for a finished job.
///
/// Every level is optional: the service omits or nulls fields freely, and a
/// structurally sparse document is valid input that simply yields no samples.
#[derive(Debug, Default, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub results: Option<Vec<ResultEntry>>,
}

/// One entry of the top-level results array.
#[derive(Debug, Deserialize)]
pub struct ResultEntry {
    #[serde(default)]
    pub content: Option<ResultContent>,
}

/// Nested content of a result entry.
#[derive(Debug, Deserialize)]
pub struct ResultContent {
    #[serde(default)]
    pub search_results: Option<Vec<SearchItem>>,
}

/// A single search result item. Both price fields are loosely typed upstream.
#[derive(Debug, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub price: Option<FieldValue>,
    #[serde(default)]
    pub min_price: Option<FieldValue>,
}

/// A JSON field that may arrive as a number, a string, or anything else.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Coerces the field to a numeric price.
    ///
    /// Strings are stripped of thousands-separator commas before parsing.
    /// Empty strings and unparseable values yield `None` rather than an
    /// error: malformed per-item data is expected noise.
    pub fn as_price(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => {
                let cleaned = s.replace(',', "");
                let cleaned = cleaned.trim();
                if cleaned.is_empty() {
                    return None;
                }
                cleaned.parse().ok()
            }
            FieldValue::Other(_) => None,
        }
    }
}
