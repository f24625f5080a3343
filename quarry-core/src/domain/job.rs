//! Job status types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing job status as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    InProgress,
    Completed,
    Failed,
    Stopping,
    Stopped,
}

impl JobStatus {
    /// Whether the job can no longer change state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Stopped
        )
    }
}

/// Snapshot of a remote job returned by a describe call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobDescription {
    pub processing_job_name: String,
    pub processing_job_status: JobStatus,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub exit_message: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub processing_end_time: Option<DateTime<Utc>>,
}

impl JobDescription {
    pub fn status(&self) -> JobStatus {
        self.processing_job_status
    }
}
