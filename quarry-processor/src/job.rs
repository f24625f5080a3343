//! Handle to a submitted processing job

use quarry_core::domain::channel::{InputDescriptor, OutputDescriptor};
use quarry_core::domain::job::{JobDescription, JobStatus};
use tracing::{debug, info, warn};

use crate::error::{ProcessingError, Result};
use crate::session::Session;

/// A processing job created by this client
///
/// The job name is the only key used to talk to the service about the job.
/// Inputs and outputs are kept as they were submitted.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    session: Session,
    job_name: String,
    inputs: Vec<InputDescriptor>,
    outputs: Vec<OutputDescriptor>,
    terminal_status: Option<JobStatus>,
}

impl ProcessingJob {
    pub(crate) fn new(
        session: Session,
        job_name: String,
        inputs: Vec<InputDescriptor>,
        outputs: Vec<OutputDescriptor>,
    ) -> Self {
        Self {
            session,
            job_name,
            inputs,
            outputs,
            terminal_status: None,
        }
    }

    /// Rebuilds a handle for an existing remote job
    ///
    /// Attaching to jobs this client did not create is not supported.
    pub fn attach(_session: &Session, _job_name: &str) -> Result<Self> {
        Err(ProcessingError::NotImplemented(
            "attaching to an existing processing job",
        ))
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn inputs(&self) -> &[InputDescriptor] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputDescriptor] {
        &self.outputs
    }

    /// Status observed when `wait` last returned, if it has
    pub fn terminal_status(&self) -> Option<JobStatus> {
        self.terminal_status
    }

    pub async fn describe(&self) -> Result<JobDescription> {
        Ok(self
            .session
            .service()
            .describe_processing_job(&self.job_name)
            .await?)
    }

    /// Asks the service to stop the job without waiting for it to stop
    pub async fn stop(&self) -> Result<()> {
        info!(job_name = %self.job_name, "Stopping processing job");
        self.session
            .service()
            .stop_processing_job(&self.job_name)
            .await?;
        Ok(())
    }

    /// Polls until the job reaches a terminal state
    ///
    /// With `stream_logs`, every log event is forwarded to the session's sink
    /// between polls and once more after the job finishes. There is no
    /// client-side timeout.
    ///
    /// # Errors
    /// Returns [`ProcessingError::JobFailed`] if the job ends in `Failed`, or
    /// the first remote error hit while polling.
    pub async fn wait(&mut self, stream_logs: bool) -> Result<JobDescription> {
        info!(job_name = %self.job_name, stream_logs, "Waiting for processing job");

        let mut log_token: Option<String> = None;
        let description = loop {
            if stream_logs {
                self.drain_logs(&mut log_token).await?;
            }

            let description = self.describe().await?;
            if description.status().is_terminal() {
                break description;
            }

            debug!(
                job_name = %self.job_name,
                status = ?description.status(),
                "Processing job still running"
            );
            tokio::time::sleep(self.session.poll_interval()).await;
        };

        if stream_logs {
            self.drain_logs(&mut log_token).await?;
        }

        let status = description.status();
        self.terminal_status = Some(status);

        if status == JobStatus::Failed {
            let reason = description
                .failure_reason
                .clone()
                .unwrap_or_else(|| "no failure reason reported".to_string());
            warn!(job_name = %self.job_name, reason = %reason, "Processing job failed");
            return Err(ProcessingError::JobFailed {
                job_name: self.job_name.clone(),
                reason,
            });
        }

        info!(job_name = %self.job_name, status = ?status, "Processing job finished");
        Ok(description)
    }

    /// Forwards log pages to the sink until the service has nothing new
    async fn drain_logs(&self, token: &mut Option<String>) -> Result<()> {
        let sink = self.session.log_sink();
        loop {
            let page = self
                .session
                .service()
                .fetch_job_logs(&self.job_name, token.as_deref())
                .await?;

            for event in &page.events {
                sink.write(&self.job_name, event);
            }

            let exhausted = page.events.is_empty() || page.next_token.is_none();
            if page.next_token.is_some() {
                *token = page.next_token;
            }
            if exhausted {
                return Ok(());
            }
        }
    }
}
