//! Orchestrators that run processing jobs and remember them

use quarry_core::domain::channel::{Channel, InputDescriptor, OutputDescriptor};
use quarry_core::domain::config::ProcessingConfiguration;
use tracing::info;

use crate::error::Result;
use crate::hook::{SubmissionHook, SubmissionPlan};
use crate::job::ProcessingJob;
use crate::normalize::{check_input_types, normalize_inputs, normalize_outputs};
use crate::script::ScriptSource;
use crate::session::Session;
use crate::submit::{NormalizedJob, resolve_job_name, submit};

/// Per-run arguments
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub inputs: Vec<Channel<InputDescriptor>>,
    pub outputs: Vec<Channel<OutputDescriptor>>,
    /// Block until the job reaches a terminal state
    pub wait: bool,
    /// Stream job logs while waiting
    pub logs: bool,
    pub job_name: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
            wait: true,
            logs: true,
            job_name: None,
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: impl Into<Channel<InputDescriptor>>) -> Self {
        self.inputs.push(input.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<Channel<OutputDescriptor>>) -> Self {
        self.outputs.push(output.into());
        self
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_logs(mut self, logs: bool) -> Self {
        self.logs = logs;
        self
    }

    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = Some(job_name.into());
        self
    }
}

/// Runs processing jobs for one configuration
///
/// Every job started through a processor is appended to its history, even
/// when waiting on it fails afterwards.
#[derive(Debug)]
pub struct Processor {
    config: ProcessingConfiguration,
    session: Session,
    jobs: Vec<ProcessingJob>,
}

impl Processor {
    pub fn new(config: ProcessingConfiguration, session: Session) -> Self {
        Self {
            config,
            session,
            jobs: Vec::new(),
        }
    }

    pub fn config(&self) -> &ProcessingConfiguration {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every job this processor has submitted, oldest first
    pub fn jobs(&self) -> &[ProcessingJob] {
        &self.jobs
    }

    pub fn latest_job(&self) -> Option<&ProcessingJob> {
        self.jobs.last()
    }

    /// Normalizes channels, submits a job and optionally waits for it
    pub async fn run(&mut self, options: RunOptions) -> Result<&ProcessingJob> {
        self.run_with_hook(options, None).await
    }

    /// Like [`Processor::run`], letting `hook` adjust the plan first
    pub async fn run_with_hook(
        &mut self,
        options: RunOptions,
        hook: Option<&dyn SubmissionHook>,
    ) -> Result<&ProcessingJob> {
        check_input_types(&options.inputs)?;

        let job_name = resolve_job_name(&self.config, options.job_name.as_deref());
        let mut plan = SubmissionPlan {
            job_name,
            inputs: options.inputs,
            outputs: options.outputs,
            entrypoint: None,
        };

        if let Some(hook) = hook {
            hook.prepare(&self.session, &mut plan).await?;
        }

        let inputs = normalize_inputs(&self.session, &plan.job_name, plan.inputs).await?;
        let outputs = normalize_outputs(&self.session, &plan.job_name, plan.outputs).await?;

        let job = submit(
            &self.session,
            &self.config,
            NormalizedJob {
                job_name: plan.job_name,
                inputs,
                outputs,
                entrypoint: plan.entrypoint,
            },
        )
        .await?;

        self.jobs.push(job);
        let index = self.jobs.len() - 1;
        info!(
            job_name = %self.jobs[index].job_name(),
            history = self.jobs.len(),
            "Processing job started"
        );

        if options.wait {
            self.jobs[index].wait(options.logs).await?;
        }

        Ok(&self.jobs[index])
    }

    /// Rebuilds a handle for a job this processor did not start
    pub fn attach(&self, job_name: &str) -> Result<ProcessingJob> {
        ProcessingJob::attach(&self.session, job_name)
    }
}

/// Runs a single Python or shell script in the configured image
///
/// The configured entrypoint is ignored; each run derives its own from the
/// script.
#[derive(Debug)]
pub struct ScriptProcessor {
    processor: Processor,
    py_version: String,
}

impl ScriptProcessor {
    pub fn new(config: ProcessingConfiguration, session: Session) -> Self {
        Self {
            processor: Processor::new(config, session),
            py_version: "py3".to_string(),
        }
    }

    /// Interpreter tag for `.py` scripts: `py3`, `py2`, or anything else for
    /// plain `python`
    pub fn with_py_version(mut self, py_version: impl Into<String>) -> Self {
        self.py_version = py_version.into();
        self
    }

    pub fn py_version(&self) -> &str {
        &self.py_version
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn jobs(&self) -> &[ProcessingJob] {
        self.processor.jobs()
    }

    pub fn latest_job(&self) -> Option<&ProcessingJob> {
        self.processor.latest_job()
    }

    /// Uploads `source` and runs the script it names
    ///
    /// `source` is a script file, a directory (then `script_name` is
    /// required) or a remote URI.
    pub async fn run(
        &mut self,
        source: &str,
        script_name: Option<&str>,
        options: RunOptions,
    ) -> Result<&ProcessingJob> {
        let hook = ScriptSource::new(
            source,
            script_name.map(str::to_string),
            self.py_version.clone(),
        );
        self.processor
            .run_with_hook(options, Some(&hook as &dyn SubmissionHook))
            .await
    }
}
