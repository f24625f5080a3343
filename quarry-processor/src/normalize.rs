//! Input and output normalization
//!
//! Turns raw caller channels into fully specified descriptors: every channel
//! gets a name, every input gets a remote source, every bare output path gets
//! a descriptor with a default destination.

use quarry_core::domain::channel::{Channel, InputDescriptor, OutputDescriptor};
use quarry_core::uri::{is_remote_uri, remote_uri};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::session::Session;

/// Name of the remote folder bare output paths are written to
pub const DEFAULT_OUTPUT_FOLDER: &str = "output";

/// Rejects any input given as a bare path instead of a descriptor
pub fn check_input_types(inputs: &[Channel<InputDescriptor>]) -> Result<()> {
    match inputs.iter().position(|input| !input.is_descriptor()) {
        Some(index) => Err(ProcessingError::TypeConstraint(format!(
            "Inputs must be provided as InputDescriptor values, got a bare path at position {}",
            index + 1
        ))),
        None => Ok(()),
    }
}

/// Names and resolves every input, uploading local sources
///
/// Inputs are processed in order; unnamed inputs are called `input-<n>` with
/// `n` counting from 1. A source that is not a remote URI is uploaded to
/// `s3://<default bucket>/<job name>/<input name>` and replaced by the URI the
/// uploader returns.
///
/// # Errors
/// Fails with [`ProcessingError::TypeConstraint`] if any element is a bare
/// path; this is checked for the whole list before anything is uploaded.
pub async fn normalize_inputs(
    session: &Session,
    job_name: &str,
    inputs: Vec<Channel<InputDescriptor>>,
) -> Result<Vec<InputDescriptor>> {
    check_input_types(&inputs)?;

    let mut descriptors: Vec<InputDescriptor> = inputs
        .into_iter()
        .filter_map(|input| match input {
            Channel::Descriptor(descriptor) => Some(descriptor),
            Channel::Path(_) => None,
        })
        .collect();

    for (count, descriptor) in (1..).zip(descriptors.iter_mut()) {
        let name = descriptor
            .name
            .get_or_insert_with(|| format!("input-{}", count))
            .clone();

        if is_remote_uri(&descriptor.source) {
            continue;
        }

        let bucket = session.default_bucket().await?;
        let desired_uri = remote_uri(&bucket, &[job_name, &name]);
        info!(
            input = %name,
            source = %descriptor.source,
            "Uploading local input to {}",
            desired_uri
        );

        descriptor.source = session
            .upload(Path::new(&descriptor.source), &desired_uri)
            .await?;
    }

    debug!(job_name, count = descriptors.len(), "Normalized inputs");
    Ok(descriptors)
}

/// Names every output and expands bare paths into descriptors
///
/// A bare path `p` becomes an output reading from `p` inside the container
/// and writing to `s3://<default bucket>/<job name>/output`. Unnamed outputs
/// are called `output-<n>`. Nothing is uploaded.
pub async fn normalize_outputs(
    session: &Session,
    job_name: &str,
    outputs: Vec<Channel<OutputDescriptor>>,
) -> Result<Vec<OutputDescriptor>> {
    let mut descriptors = Vec::with_capacity(outputs.len());

    for (count, output) in (1..).zip(outputs) {
        let mut descriptor = match output {
            Channel::Descriptor(descriptor) => descriptor,
            Channel::Path(path) => {
                let bucket = session.default_bucket().await?;
                let destination = remote_uri(&bucket, &[job_name, DEFAULT_OUTPUT_FOLDER]);
                OutputDescriptor::new(path, destination)
            }
        };

        if descriptor.name.is_none() {
            descriptor.name = Some(format!("output-{}", count));
        }
        descriptors.push(descriptor);
    }

    debug!(job_name, count = descriptors.len(), "Normalized outputs");
    Ok(descriptors)
}
