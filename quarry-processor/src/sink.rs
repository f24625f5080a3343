//! Destinations for remote job output
//!
//! While waiting on a job with log streaming enabled, every log event the
//! service returns is handed to the session's [`LogSink`].

use quarry_core::domain::log::LogEvent;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Receives log events streamed from running jobs
pub trait LogSink: Send + Sync {
    /// Write one event produced by `job_name`
    fn write(&self, job_name: &str, event: &LogEvent);
}

/// Re-emits job output as `tracing` events under the `quarry::job_logs` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn write(&self, job_name: &str, event: &LogEvent) {
        info!(
            target: "quarry::job_logs",
            job_name,
            stream = %event.stream,
            timestamp = %event.timestamp,
            "{}",
            event.message
        );
    }
}

/// Collects job output in memory
///
/// Useful when the caller wants to inspect output after `wait` returns.
#[derive(Debug, Default, Clone)]
pub struct BufferedLogSink {
    buffer: Arc<Mutex<Vec<(String, LogEvent)>>>,
}

impl BufferedLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears everything collected so far
    pub fn drain(&self) -> Vec<(String, LogEvent)> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.drain(..).collect()
    }
}

impl LogSink for BufferedLogSink {
    fn write(&self, job_name: &str, event: &LogEvent) {
        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.push((job_name.to_string(), event.clone()));
    }
}
