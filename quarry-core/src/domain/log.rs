//! Log domain types

use serde::{Deserialize, Serialize};

/// A single line of output produced by a running job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Stream the line came from, one per job instance
    pub stream: String,
    pub message: String,
}

/// A page of log events
///
/// `next_token` resumes reading after the last returned event. It is `None`
/// while the job has not produced any output yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogPage {
    pub events: Vec<LogEvent>,
    #[serde(default)]
    pub next_token: Option<String>,
}
