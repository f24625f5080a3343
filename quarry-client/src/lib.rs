//! Quarry HTTP Client
//!
//! Collaborators used by the processing orchestrator:
//! - [`ProcessingService`]: create, describe, stop and tail processing jobs
//! - [`Uploader`]: move local files and directories to remote storage
//!
//! Both are traits so the orchestrator can be driven by in-memory fakes.
//! [`ProcessingClient`] and [`HttpUploader`] implement them against a JSON
//! gateway in front of the compute service and the object store.
//!
//! # Example
//!
//! ```no_run
//! use quarry_client::{ProcessingClient, ProcessingService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ProcessingClient::new("http://localhost:8080");
//!
//!     let description = client.describe_processing_job("prep-2024-05-01-12-30-05-123").await?;
//!     println!("{:?}", description.processing_job_status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod jobs;
mod service;
mod storage;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use error::{ClientError, Result};
pub use service::{ProcessingService, Uploader};
pub use storage::HttpUploader;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the processing service API
///
/// Endpoints are grouped by concern:
/// - Job lifecycle (create, describe, stop)
/// - Job logs
/// - Storage lookups (default bucket)
#[derive(Debug, Clone)]
pub struct ProcessingClient {
    /// Base URL of the service gateway (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ProcessingClient {
    /// Create a new processing service client
    ///
    /// # Example
    /// ```
    /// use quarry_client::ProcessingClient;
    ///
    /// let client = ProcessingClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use quarry_client::ProcessingClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ProcessingClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        check_status(response).await.map(|_| ())
    }
}

/// Turns a non-success status into an [`ClientError::ApiError`]
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ProcessingClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ProcessingClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ProcessingClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
