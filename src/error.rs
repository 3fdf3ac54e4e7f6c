//! Error taxonomy for the job pipeline.

/// Boxed transport/decode error carried as the source of a pipeline failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of the job pipeline, one variant per stage.
///
/// Each stage short-circuits the pipeline on its first error; nothing is
/// retried. `NoData` is the only variant that can occur after a fully
/// successful download.
#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    /// Job submission failed, or the response carried no job id.
    #[error("failed to create search job")]
    Creation(#[source] BoxError),

    /// A status check failed at the transport level.
    #[error("failed to check job status")]
    Poll(#[source] BoxError),

    /// The remote service reported the job as failed.
    #[error("search job failed remotely")]
    JobFailed,

    /// The job never reached a terminal status inside the wait budget.
    #[error("job did not complete within {max_wait}s")]
    Timeout { max_wait: u64 },

    /// Result retrieval failed at the transport level.
    #[error("failed to download job results")]
    Download(#[source] BoxError),

    /// Extraction succeeded structurally but yielded zero valid samples.
    #[error("no valid prices found for \"{product}\"")]
    NoData { product: String },
}

impl PriceError {
    /// Wraps an error as a job-creation failure.
    pub fn creation(err: impl Into<BoxError>) -> Self {
        PriceError::Creation(err.into())
    }

    /// Wraps an error as a status-poll failure.
    pub fn poll(err: impl Into<BoxError>) -> Self {
        PriceError::Poll(err.into())
    }

    /// Wraps an error as a result-download failure.
    pub fn download(err: impl Into<BoxError>) -> Self {
        PriceError::Download(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PriceError::creation("missing job_id");
        assert_eq!(err.to_string(), "failed to create search job");

        let err = PriceError::Timeout { max_wait: 30 };
        assert_eq!(err.to_string(), "job did not complete within 30s");

        let err = PriceError::NoData { product: "widget".to_string() };
        assert_eq!(err.to_string(), "no valid prices found for \"widget\"");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = PriceError::poll("connection reset");
        assert!(err.source().is_some());
        assert_eq!(err.source().unwrap().to_string(), "connection reset");

        let err = PriceError::JobFailed;
        assert!(err.source().is_none());
    }
}
