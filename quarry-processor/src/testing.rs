//! In-memory collaborators for unit tests

use async_trait::async_trait;
use quarry_client::{ClientError, ProcessingService, Uploader};
use quarry_core::domain::job::{JobDescription, JobStatus};
use quarry_core::domain::log::{LogEvent, LogPage};
use quarry_core::dto::processing::ProcessingRequest;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::session::Session;

/// Processing service that records every call
pub struct FakeService {
    bucket: String,
    bucket_lookups: AtomicUsize,
    submitted: Mutex<Vec<ProcessingRequest>>,
    statuses: Mutex<VecDeque<JobStatus>>,
    failure_reason: Mutex<Option<String>>,
    log_pages: Mutex<VecDeque<LogPage>>,
    log_tokens: Mutex<Vec<Option<String>>>,
    stopped: Mutex<Vec<String>>,
    reject_submissions: Mutex<Option<u16>>,
}

impl FakeService {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            bucket_lookups: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            statuses: Mutex::new(VecDeque::from([JobStatus::Completed])),
            failure_reason: Mutex::new(None),
            log_pages: Mutex::new(VecDeque::new()),
            log_tokens: Mutex::new(Vec::new()),
            stopped: Mutex::new(Vec::new()),
            reject_submissions: Mutex::new(None),
        }
    }

    /// Statuses returned by successive describe calls; the last one repeats
    pub fn with_statuses(self, statuses: &[JobStatus]) -> Self {
        *self.statuses.lock().unwrap() = statuses.iter().copied().collect();
        self
    }

    pub fn with_failure_reason(self, reason: &str) -> Self {
        *self.failure_reason.lock().unwrap() = Some(reason.to_string());
        self
    }

    pub fn with_log_page(self, messages: &[&str], next_token: Option<&str>) -> Self {
        let events = messages
            .iter()
            .map(|m| LogEvent {
                timestamp: chrono::Utc::now(),
                stream: "algo-1".to_string(),
                message: m.to_string(),
            })
            .collect();
        self.log_pages.lock().unwrap().push_back(LogPage {
            events,
            next_token: next_token.map(str::to_string),
        });
        self
    }

    pub fn rejecting_submissions(self, status: u16) -> Self {
        *self.reject_submissions.lock().unwrap() = Some(status);
        self
    }

    pub fn bucket_lookups(&self) -> usize {
        self.bucket_lookups.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<ProcessingRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn stopped(&self) -> Vec<String> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn log_tokens(&self) -> Vec<Option<String>> {
        self.log_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessingService for FakeService {
    async fn default_bucket(&self) -> quarry_client::Result<String> {
        self.bucket_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.bucket.clone())
    }

    async fn create_processing_job(&self, request: &ProcessingRequest) -> quarry_client::Result<()> {
        if let Some(status) = *self.reject_submissions.lock().unwrap() {
            return Err(ClientError::api_error(status, "rejected"));
        }
        self.submitted.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn describe_processing_job(&self, job_name: &str) -> quarry_client::Result<JobDescription> {
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses.front().copied().unwrap_or(JobStatus::InProgress)
        };

        Ok(JobDescription {
            processing_job_name: job_name.to_string(),
            processing_job_status: status,
            failure_reason: self.failure_reason.lock().unwrap().clone(),
            exit_message: None,
            creation_time: None,
            processing_end_time: None,
        })
    }

    async fn stop_processing_job(&self, job_name: &str) -> quarry_client::Result<()> {
        self.stopped.lock().unwrap().push(job_name.to_string());
        Ok(())
    }

    async fn fetch_job_logs(
        &self,
        _job_name: &str,
        next_token: Option<&str>,
    ) -> quarry_client::Result<LogPage> {
        self.log_tokens
            .lock()
            .unwrap()
            .push(next_token.map(str::to_string));

        Ok(self.log_pages.lock().unwrap().pop_front().unwrap_or(LogPage {
            events: Vec::new(),
            next_token: next_token.map(str::to_string),
        }))
    }
}

/// Uploader that pretends every upload landed at the desired URI
#[derive(Default)]
pub struct FakeUploader {
    uploads: Mutex<Vec<(PathBuf, String)>>,
}

impl FakeUploader {
    pub fn uploads(&self) -> Vec<(PathBuf, String)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Uploader for FakeUploader {
    async fn upload(&self, local_path: &Path, desired_uri: &str) -> quarry_client::Result<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((local_path.to_path_buf(), desired_uri.to_string()));
        Ok(desired_uri.to_string())
    }
}

/// Session over fresh fakes, polling without delay
pub fn fake_session(service: FakeService) -> (Session, Arc<FakeService>, Arc<FakeUploader>) {
    let service = Arc::new(service);
    let uploader = Arc::new(FakeUploader::default());
    let session = Session::new(service.clone(), uploader.clone())
        .with_poll_interval(Duration::from_millis(1));
    (session, service, uploader)
}
