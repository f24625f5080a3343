//! Quarry Processor
//!
//! Prepares, submits and tracks managed processing jobs. A [`Processor`]
//! turns caller channels into a validated request, uploads local inputs
//! through the session's uploader, submits the job and optionally waits for
//! it while streaming its logs. [`ScriptProcessor`] does the same for a single
//! Python or shell script.
//!
//! ```no_run
//! use quarry_core::domain::channel::InputDescriptor;
//! use quarry_core::domain::config::ProcessingConfiguration;
//! use quarry_processor::{Processor, RunOptions, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = Session::from_env()?;
//! let config = ProcessingConfiguration::new(
//!     "arn:aws:iam::123456789012:role/Processing",
//!     "registry.example.com/team/sklearn:1.2",
//!     "ml.m5.xlarge",
//!     1,
//! );
//!
//! let mut processor = Processor::new(config, session);
//! let options = RunOptions::new()
//!     .with_input(InputDescriptor::new("data/train.csv", "/opt/ml/processing/input"))
//!     .with_output("/opt/ml/processing/output");
//! processor.run(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod hook;
pub mod job;
pub mod normalize;
pub mod processor;
pub mod script;
pub mod session;
pub mod sink;
pub mod submit;

#[cfg(test)]
mod testing;

pub use error::{ProcessingError, Result};
pub use hook::{SubmissionHook, SubmissionPlan};
pub use job::ProcessingJob;
pub use processor::{Processor, RunOptions, ScriptProcessor};
pub use session::Session;
pub use sink::{BufferedLogSink, LogSink, TracingLogSink};
