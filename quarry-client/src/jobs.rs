//! Processing job API endpoints

use quarry_core::domain::job::JobDescription;
use quarry_core::domain::log::LogPage;
use quarry_core::dto::processing::ProcessingRequest;
use serde::Deserialize;
use tracing::debug;

use crate::ProcessingClient;
use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize)]
struct DefaultBucketResponse {
    bucket: String,
}

impl ProcessingClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a new processing job
    ///
    /// # Arguments
    /// * `request` - The fully built submission payload
    pub async fn create_job(&self, request: &ProcessingRequest) -> Result<()> {
        let url = format!("{}/processing-jobs", self.base_url);
        debug!(job_name = %request.processing_job_name, "POST {}", url);
        let response = self.client.post(&url).json(request).send().await?;

        self.handle_empty_response(response).await
    }

    /// Get the current state of a job
    ///
    /// # Arguments
    /// * `job_name` - Name the job was submitted under
    pub async fn describe_job(&self, job_name: &str) -> Result<JobDescription> {
        let url = format!("{}/processing-jobs/{}", self.base_url, job_name);
        let response = self.client.get(&url).send().await?;

        match self.handle_response(response).await {
            Err(e) if e.is_not_found() => Err(ClientError::NotFound(job_name.to_string())),
            other => other,
        }
    }

    /// Request cancellation of a job
    ///
    /// Returns as soon as the service accepted the request; the job keeps
    /// running until it reaches `Stopped`.
    pub async fn stop_job(&self, job_name: &str) -> Result<()> {
        let url = format!("{}/processing-jobs/{}/stop", self.base_url, job_name);
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Job Logs
    // =============================================================================

    /// Fetch the next page of log events for a job
    ///
    /// # Arguments
    /// * `job_name` - Name of the job
    /// * `next_token` - Token from the previous page, `None` to start from the beginning
    pub async fn job_logs(&self, job_name: &str, next_token: Option<&str>) -> Result<LogPage> {
        let url = format!("{}/processing-jobs/{}/logs", self.base_url, job_name);
        let mut request = self.client.get(&url);
        if let Some(token) = next_token {
            request = request.query(&[("next_token", token)]);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Storage
    // =============================================================================

    /// Look up the bucket jobs store their inputs and outputs in by default
    pub async fn fetch_default_bucket(&self) -> Result<String> {
        let url = format!("{}/storage/default-bucket", self.base_url);
        let response = self.client.get(&url).send().await?;

        let body: DefaultBucketResponse = self.handle_response(response).await?;
        Ok(body.bucket)
    }
}
