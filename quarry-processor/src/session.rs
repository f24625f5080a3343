//! Session: the bundle of collaborators a job talks through
//!
//! A session is cheap to clone; every clone shares the same collaborators and
//! the same cached default bucket.

use anyhow::{Context, Result as AnyResult};
use quarry_client::{HttpUploader, ProcessingClient, ProcessingService, ServiceConfig, Uploader};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::Result;
use crate::sink::{LogSink, TracingLogSink};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to the processing service, the object store and the log sink
#[derive(Clone)]
pub struct Session {
    service: Arc<dyn ProcessingService>,
    uploader: Arc<dyn Uploader>,
    log_sink: Arc<dyn LogSink>,
    poll_interval: Duration,
    default_bucket: Arc<OnceCell<String>>,
}

impl Session {
    /// Creates a session over arbitrary collaborators
    pub fn new(service: Arc<dyn ProcessingService>, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            service,
            uploader,
            log_sink: Arc::new(TracingLogSink),
            poll_interval: DEFAULT_POLL_INTERVAL,
            default_bucket: Arc::new(OnceCell::new()),
        }
    }

    /// Creates a session backed by the HTTP clients
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ServiceConfig) -> AnyResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let service = ProcessingClient::with_client(config.endpoint.clone(), http.clone());
        let uploader = HttpUploader::with_client(config.storage_endpoint.clone(), http);

        Ok(Self::new(Arc::new(service), Arc::new(uploader))
            .with_poll_interval(config.poll_interval))
    }

    /// Creates a session from `QUARRY_*` environment variables
    pub fn from_env() -> AnyResult<Self> {
        let config = ServiceConfig::from_env().context("Failed to load service configuration")?;
        Self::from_config(&config)
    }

    pub fn with_log_sink(mut self, log_sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = log_sink;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn service(&self) -> &dyn ProcessingService {
        self.service.as_ref()
    }

    pub fn log_sink(&self) -> &dyn LogSink {
        self.log_sink.as_ref()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Default bucket, fetched from the service on first use
    pub async fn default_bucket(&self) -> Result<String> {
        let bucket = self
            .default_bucket
            .get_or_try_init(|| async {
                let bucket = self.service.default_bucket().await?;
                debug!(bucket = %bucket, "Resolved default bucket");
                Ok::<_, quarry_client::ClientError>(bucket)
            })
            .await?;

        Ok(bucket.clone())
    }

    /// Uploads a local file or directory, returning its remote URI
    pub async fn upload(&self, local_path: &Path, desired_uri: &str) -> Result<String> {
        Ok(self.uploader.upload(local_path, desired_uri).await?)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("poll_interval", &self.poll_interval)
            .field("default_bucket", &self.default_bucket.get())
            .finish_non_exhaustive()
    }
}
