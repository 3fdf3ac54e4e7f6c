//! Price analysis command: the full job pipeline for one product query.

use crate::analysis::{extract_prices, PriceBand, PriceReport};
use crate::config::Config;
use crate::error::PriceError;
use crate::priceapi::{await_completion, JobApi, PriceApiClient};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// Runs one product query end to end: submit, poll, download, analyze.
pub struct AnalyzeCommand {
    config: Config,
}

impl AnalyzeCommand {
    /// Creates a new analyze command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the pipeline and returns the price report.
    pub async fn execute(&self, product: &str) -> Result<PriceReport> {
        let client = PriceApiClient::new(&self.config).context("Failed to create API client")?;

        Ok(self.execute_with_client(&client, product).await?)
    }

    /// Executes the pipeline with a provided client (for testing).
    ///
    /// Stages run strictly in sequence; the first failure short-circuits the
    /// rest. Narration goes to stdout at each stage boundary.
    pub async fn execute_with_client(
        &self,
        api: &impl JobApi,
        product: &str,
    ) -> Result<PriceReport, PriceError> {
        println!("Searching for: {}", product);

        println!("Creating job...");
        let job_id = api.submit(product).await?;
        println!("Job created with ID: {}", job_id);

        println!("Waiting for job to complete...");
        await_completion(
            api,
            &job_id,
            Duration::from_secs(self.config.max_wait_secs),
            Duration::from_millis(self.config.poll_interval_ms),
        )
        .await?;
        println!("Job completed!");

        println!("Downloading results...");
        let raw = api.download(&job_id).await?;

        println!("Calculating price statistics...");
        let band = PriceBand::new(self.config.min_price, self.config.max_price);
        let samples = extract_prices(&raw, &band);
        debug!("{} samples inside band {:?}", samples.len(), band);

        PriceReport::from_samples(product, samples)
            .ok_or_else(|| PriceError::NoData { product: product.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priceapi::models::{JobState, RawResults};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock job API with a scripted status sequence.
    struct MockJobApi {
        submit_result: Option<String>,
        statuses: Vec<JobState>,
        poll_count: AtomicU32,
        results_json: String,
        fail_download: bool,
    }

    impl MockJobApi {
        fn new(results_json: &str) -> Self {
            Self {
                submit_result: Some("job-1".to_string()),
                statuses: vec![JobState::Finished],
                poll_count: AtomicU32::new(0),
                results_json: results_json.to_string(),
                fail_download: false,
            }
        }

        fn with_statuses(mut self, statuses: Vec<JobState>) -> Self {
            self.statuses = statuses;
            self
        }
    }

    #[async_trait]
    impl JobApi for MockJobApi {
        async fn submit(&self, _product: &str) -> Result<String, PriceError> {
            self.submit_result
                .clone()
                .ok_or_else(|| PriceError::creation("response carried no job_id"))
        }

        async fn status(&self, _job_id: &str) -> Result<JobState, PriceError> {
            let idx = self.poll_count.fetch_add(1, Ordering::SeqCst) as usize;
            let idx = idx.min(self.statuses.len() - 1);
            Ok(self.statuses[idx].clone())
        }

        async fn download(&self, _job_id: &str) -> Result<RawResults, PriceError> {
            if self.fail_download {
                return Err(PriceError::download("connection reset"));
            }
            Ok(serde_json::from_str(&self.results_json).unwrap())
        }
    }

    fn make_test_config() -> Config {
        Config {
            token: Some("test-token".to_string()),
            max_wait_secs: 5,
            poll_interval_ms: 1,
            ..Config::default()
        }
    }

    const RESULTS_JSON: &str = r#"{
        "results": [
            {"content": {"search_results": [
                {"price": "1,000", "min_price": 50000},
                {"price": "200.5"}
            ]}}
        ]
    }"#;

    #[tokio::test]
    async fn test_pipeline_success() {
        let api = MockJobApi::new(RESULTS_JSON);
        let cmd = AnalyzeCommand::new(make_test_config());

        let report = cmd.execute_with_client(&api, "headphones").await.unwrap();
        assert_eq!(report.product, "headphones");
        assert_eq!(report.count, 2);
        assert_eq!(report.average, 600.25);
        assert_eq!(report.median, 600.25);
        assert_eq!(report.min, 200.5);
        assert_eq!(report.max, 1000.0);
        assert_eq!(report.prices, vec![200.5, 1000.0]);
    }

    #[tokio::test]
    async fn test_pipeline_polls_until_finished() {
        let api = MockJobApi::new(RESULTS_JSON).with_statuses(vec![
            JobState::Running("pending".to_string()),
            JobState::Running("pending".to_string()),
            JobState::Finished,
        ]);
        let cmd = AnalyzeCommand::new(make_test_config());

        let report = cmd.execute_with_client(&api, "headphones").await.unwrap();
        assert_eq!(report.count, 2);
        assert_eq!(api.poll_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_pipeline_submit_failure() {
        let mut api = MockJobApi::new(RESULTS_JSON);
        api.submit_result = None;
        let cmd = AnalyzeCommand::new(make_test_config());

        let result = cmd.execute_with_client(&api, "headphones").await;
        assert!(matches!(result, Err(PriceError::Creation(_))));
    }

    #[tokio::test]
    async fn test_pipeline_job_failed() {
        let api = MockJobApi::new(RESULTS_JSON).with_statuses(vec![JobState::Failed]);
        let cmd = AnalyzeCommand::new(make_test_config());

        let result = cmd.execute_with_client(&api, "headphones").await;
        assert!(matches!(result, Err(PriceError::JobFailed)));
    }

    #[tokio::test]
    async fn test_pipeline_timeout() {
        let api = MockJobApi::new(RESULTS_JSON)
            .with_statuses(vec![JobState::Running("pending".to_string())]);
        let mut config = make_test_config();
        config.max_wait_secs = 0;
        let cmd = AnalyzeCommand::new(config);

        let result = cmd.execute_with_client(&api, "headphones").await;
        assert!(matches!(result, Err(PriceError::Timeout { max_wait: 0 })));
        // Timed out before the first status check
        assert_eq!(api.poll_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pipeline_download_failure() {
        let mut api = MockJobApi::new(RESULTS_JSON);
        api.fail_download = true;
        let cmd = AnalyzeCommand::new(make_test_config());

        let result = cmd.execute_with_client(&api, "headphones").await;
        assert!(matches!(result, Err(PriceError::Download(_))));
    }

    #[tokio::test]
    async fn test_pipeline_no_data() {
        let api = MockJobApi::new("{}");
        let cmd = AnalyzeCommand::new(make_test_config());

        let result = cmd.execute_with_client(&api, "headphones").await;
        match result {
            Err(PriceError::NoData { product }) => assert_eq!(product, "headphones"),
            other => panic!("expected NoData, got {:?}", other.map(|r| r.count)),
        }
    }

    #[tokio::test]
    async fn test_pipeline_out_of_band_only_is_no_data() {
        let json = r#"{
            "results": [
                {"content": {"search_results": [{"price": 5.0}, {"min_price": "99,999"}]}}
            ]
        }"#;
        let api = MockJobApi::new(json);
        let cmd = AnalyzeCommand::new(make_test_config());

        let result = cmd.execute_with_client(&api, "headphones").await;
        assert!(matches!(result, Err(PriceError::NoData { .. })));
    }
}
