//! Job submission
//!
//! Builds the full request payload from a configuration and normalized
//! channels, then creates the remote job with a single service call.

use quarry_core::ValidationError;
use quarry_core::domain::channel::{InputDescriptor, OutputDescriptor};
use quarry_core::domain::config::ProcessingConfiguration;
use quarry_core::dto::processing::{
    AppSpecification, ClusterConfig, ProcessingRequest, ProcessingResources, StoppingCondition,
};
use quarry_core::naming::{base_name_from_image, name_from_base};
use tracing::{debug, info};

use crate::error::Result;
use crate::job::ProcessingJob;
use crate::session::Session;

/// A job whose channels are fully resolved and ready to submit
#[derive(Debug, Clone)]
pub struct NormalizedJob {
    pub job_name: String,
    pub inputs: Vec<InputDescriptor>,
    pub outputs: Vec<OutputDescriptor>,
    /// Replaces the configured entrypoint for this job only
    pub entrypoint: Option<Vec<String>>,
}

/// Picks the name a job is submitted under
///
/// An explicit name is used verbatim. Otherwise the configured base name, or
/// one derived from the image, gets a timestamp suffix.
pub fn resolve_job_name(config: &ProcessingConfiguration, job_name: Option<&str>) -> String {
    if let Some(name) = job_name {
        return name.to_string();
    }

    let base = match &config.base_job_name {
        Some(base) if !base.is_empty() => base.clone(),
        _ => base_name_from_image(&config.image_uri),
    };
    name_from_base(&base)
}

/// Assembles the request payload
///
/// # Errors
/// Fails if any input descriptor is invalid (gzip without pipe mode).
pub fn build_request(
    config: &ProcessingConfiguration,
    job: &NormalizedJob,
) -> std::result::Result<ProcessingRequest, ValidationError> {
    let input_data_config = job
        .inputs
        .iter()
        .map(InputDescriptor::to_request_fragment)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let output_data_config = job
        .outputs
        .iter()
        .map(OutputDescriptor::to_request_fragment)
        .collect();

    let container_entrypoint = job
        .entrypoint
        .clone()
        .or_else(|| config.entrypoint.clone());

    Ok(ProcessingRequest {
        input_data_config,
        output_data_config,
        processing_job_name: job.job_name.clone(),
        processing_resources: ProcessingResources {
            cluster_config: ClusterConfig {
                instance_type: config.instance_type.clone(),
                instance_count: config.instance_count,
                volume_size_in_gb: config.volume_size_gb,
                volume_kms_key_id: config.volume_kms_key.clone(),
            },
        },
        stopping_condition: StoppingCondition {
            max_runtime_in_seconds: config.max_runtime_seconds,
        },
        app_specification: AppSpecification {
            image_uri: config.image_uri.clone(),
            container_arguments: config.arguments.clone(),
            container_entrypoint,
        },
        environment: config.env.clone(),
        network_config: config
            .network_config
            .as_ref()
            .map(|network| network.to_request_fragment()),
        role_arn: config.role.clone(),
        tags: config.tags.clone(),
    })
}

/// Submits a normalized job and returns its handle
///
/// The service is called exactly once. Any failure, local or remote, is
/// returned as is; nothing is retried.
pub async fn submit(
    session: &Session,
    config: &ProcessingConfiguration,
    job: NormalizedJob,
) -> Result<ProcessingJob> {
    let request = build_request(config, &job)?;

    info!(
        job_name = %request.processing_job_name,
        inputs = request.input_data_config.len(),
        outputs = request.output_data_config.len(),
        "Submitting processing job"
    );
    debug!(
        job_name = %request.processing_job_name,
        inputs = %serde_json::to_string(&request.input_data_config).unwrap_or_default(),
        outputs = %serde_json::to_string(&request.output_data_config).unwrap_or_default(),
        "Processing job channels"
    );

    session.service().create_processing_job(&request).await?;

    info!(job_name = %request.processing_job_name, "Processing job created");

    Ok(ProcessingJob::new(
        session.clone(),
        job.job_name,
        job.inputs,
        job.outputs,
    ))
}
