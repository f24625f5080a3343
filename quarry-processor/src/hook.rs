//! Pre-submission extension point

use async_trait::async_trait;
use quarry_core::domain::channel::{Channel, InputDescriptor, OutputDescriptor};

use crate::error::Result;
use crate::session::Session;

/// The parts of a run a hook may change before normalization
#[derive(Debug, Clone)]
pub struct SubmissionPlan {
    /// Already resolved; hooks should key uploads on it, not rename the job
    pub job_name: String,
    pub inputs: Vec<Channel<InputDescriptor>>,
    pub outputs: Vec<Channel<OutputDescriptor>>,
    /// Overrides the configured entrypoint for this run
    pub entrypoint: Option<Vec<String>>,
}

/// Adjusts a run after its job name is known and before its channels are
/// normalized
#[async_trait]
pub trait SubmissionHook: Send + Sync {
    async fn prepare(&self, session: &Session, plan: &mut SubmissionPlan) -> Result<()>;
}
