//! HTTP client for the PriceAPI job queue.

use crate::config::Config;
use crate::error::PriceError;
use crate::priceapi::models::{JobCreated, JobState, JobStatusResponse, RawResults};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const PRICEAPI_BASE: &str = "https://api.priceapi.com/v2";

/// Trait for the remote job lifecycle - enables mocking for tests.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Submits a search job and returns the assigned job id.
    async fn submit(&self, product: &str) -> Result<String, PriceError>;

    /// Checks the current status of a job.
    async fn status(&self, job_id: &str) -> Result<JobState, PriceError>;

    /// Downloads the result document of a finished job.
    async fn download(&self, job_id: &str) -> Result<RawResults, PriceError>;
}

/// PriceAPI HTTP client.
#[derive(Debug)]
pub struct PriceApiClient {
    client: Client,
    token: String,
    country: String,
    base_url: Option<String>,
}

impl PriceApiClient {
    /// Creates a new client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .context("No API token configured. Set PRICE_SCOUT_TOKEN or `token` in config.toml")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, token, country: config.country.clone(), base_url })
    }

    /// Returns the base URL (custom for testing, or the live service).
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(PRICEAPI_BASE)
    }
}

#[async_trait]
impl JobApi for PriceApiClient {
    async fn submit(&self, product: &str) -> Result<String, PriceError> {
        let url = format!("{}/jobs", self.base_url());

        // Fixed parameter set for a Google Shopping term search; only the
        // country and the search term vary per run.
        let params = [
            ("token", self.token.as_str()),
            ("country", self.country.as_str()),
            ("source", "google_shopping"),
            ("topic", "search_results"),
            ("key", "term"),
            ("max_age", "43200"),
            ("max_pages", "1"),
            ("sort_by", "ranking_descending"),
            ("condition", "any"),
            ("values", product),
        ];

        info!("Creating search job for: {}", product);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(PriceError::creation)?;

        let created: JobCreated = response.json().await.map_err(PriceError::creation)?;

        created
            .job_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PriceError::creation("response carried no job_id"))
    }

    async fn status(&self, job_id: &str) -> Result<JobState, PriceError> {
        let url = format!("{}/jobs/{}", self.base_url(), job_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(PriceError::poll)?;

        let status: JobStatusResponse = response.json().await.map_err(PriceError::poll)?;
        Ok(status.state())
    }

    async fn download(&self, job_id: &str) -> Result<RawResults, PriceError> {
        let url = format!("{}/jobs/{}/download.json", self.base_url(), job_id);

        info!("Downloading results for job: {}", job_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(PriceError::download)?;

        response.json().await.map_err(PriceError::download)
    }
}

/// Polls a job at a fixed interval until it reaches a terminal state.
///
/// Returns `Ok(())` on "finished", `JobFailed` on "failed", `Timeout` once
/// `max_wait` has elapsed without a terminal status, and `Poll` on the first
/// transport error. No backoff: the fixed interval bounds the request count
/// for the default 30-second window.
pub async fn await_completion(
    api: &impl JobApi,
    job_id: &str,
    max_wait: Duration,
    interval: Duration,
) -> Result<(), PriceError> {
    let started = Instant::now();

    loop {
        if started.elapsed() >= max_wait {
            return Err(PriceError::Timeout { max_wait: max_wait.as_secs() });
        }

        match api.status(job_id).await? {
            JobState::Finished => return Ok(()),
            JobState::Failed => return Err(PriceError::JobFailed),
            JobState::Running(status) => {
                println!("Status: {} (waited {}s)", status, started.elapsed().as_secs());
                tokio::time::sleep(interval).await;
            }
        }
    }
}
