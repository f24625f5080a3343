//! Collaborator traits consumed by the orchestrator
//!
//! The orchestrator only ever talks to the outside world through these two
//! traits, which keeps submission logic testable without a network.

use async_trait::async_trait;
use quarry_core::domain::job::JobDescription;
use quarry_core::domain::log::LogPage;
use quarry_core::dto::processing::ProcessingRequest;
use std::path::Path;

use crate::ProcessingClient;
use crate::error::Result;

/// Remote job orchestration API, keyed by job name
#[async_trait]
pub trait ProcessingService: Send + Sync {
    /// Bucket used for uploads and outputs when the caller names none
    async fn default_bucket(&self) -> Result<String>;

    /// Creates the remote job; called exactly once per submission
    async fn create_processing_job(&self, request: &ProcessingRequest) -> Result<()>;

    async fn describe_processing_job(&self, job_name: &str) -> Result<JobDescription>;

    /// Requests cancellation without waiting for it to take effect
    async fn stop_processing_job(&self, job_name: &str) -> Result<()>;

    /// Fetches the log events following `next_token`
    async fn fetch_job_logs(&self, job_name: &str, next_token: Option<&str>) -> Result<LogPage>;
}

/// Object store transfer primitive
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads a local file or directory to `desired_uri`
    ///
    /// # Returns
    /// The remote URI the data is now addressable at
    async fn upload(&self, local_path: &Path, desired_uri: &str) -> Result<String>;
}

#[async_trait]
impl ProcessingService for ProcessingClient {
    async fn default_bucket(&self) -> Result<String> {
        self.fetch_default_bucket().await
    }

    async fn create_processing_job(&self, request: &ProcessingRequest) -> Result<()> {
        self.create_job(request).await
    }

    async fn describe_processing_job(&self, job_name: &str) -> Result<JobDescription> {
        self.describe_job(job_name).await
    }

    async fn stop_processing_job(&self, job_name: &str) -> Result<()> {
        self.stop_job(job_name).await
    }

    async fn fetch_job_logs(&self, job_name: &str, next_token: Option<&str>) -> Result<LogPage> {
        self.job_logs(job_name, next_token).await
    }
}
