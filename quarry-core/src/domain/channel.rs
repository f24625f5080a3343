//! Input and output channel descriptors
//!
//! A descriptor fully specifies one storage-backed data channel of a job.
//! Descriptors can be built incrementally; the only cross-field rule
//! (gzip requires pipe mode) is checked when the descriptor is serialized.

use serde::{Deserialize, Serialize};

use crate::domain::storage::{
    S3CompressionType, S3DataDistributionType, S3DataType, S3DownloadMode, S3InputMode,
    S3UploadMode,
};
use crate::dto::processing::{
    ProcessingInputFragment, ProcessingOutputFragment, S3InputFragment, S3OutputFragment,
};
use crate::error::ValidationError;

/// A data channel fed into the job container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// Channel name, assigned during normalization when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Local path or remote URI of the data
    pub source: String,
    /// Path inside the container where the data is made available
    pub destination: String,
    #[serde(default)]
    pub data_type: S3DataType,
    #[serde(default)]
    pub input_mode: S3InputMode,
    #[serde(default)]
    pub download_mode: S3DownloadMode,
    #[serde(default)]
    pub distribution: S3DataDistributionType,
    #[serde(default)]
    pub compression: Option<S3CompressionType>,
}

impl InputDescriptor {
    /// Creates an input with default transfer policies
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            name: None,
            source: source.into(),
            destination: destination.into(),
            data_type: S3DataType::default(),
            input_mode: S3InputMode::default(),
            download_mode: S3DownloadMode::default(),
            distribution: S3DataDistributionType::default(),
            compression: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_data_type(mut self, data_type: S3DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_input_mode(mut self, input_mode: S3InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    pub fn with_download_mode(mut self, download_mode: S3DownloadMode) -> Self {
        self.download_mode = download_mode;
        self
    }

    pub fn with_distribution(mut self, distribution: S3DataDistributionType) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_compression(mut self, compression: S3CompressionType) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Serializes this input into its wire fragment
    ///
    /// # Errors
    /// Returns a validation error when gzip compression is combined with any
    /// input mode other than [`S3InputMode::Pipe`].
    pub fn to_request_fragment(&self) -> Result<ProcessingInputFragment, ValidationError> {
        if self.compression == Some(S3CompressionType::Gzip) && self.input_mode != S3InputMode::Pipe
        {
            return Err(ValidationError::new(format!(
                "Input '{}': data can only be gzipped when the input mode is Pipe (got {})",
                self.name.as_deref().unwrap_or(&self.source),
                self.input_mode
            )));
        }

        Ok(ProcessingInputFragment {
            input_name: self.name.clone(),
            s3_input: S3InputFragment {
                s3_uri: self.source.clone(),
                local_path: self.destination.clone(),
                s3_data_type: self.data_type,
                s3_input_mode: self.input_mode,
                s3_download_mode: self.download_mode,
                s3_data_distribution_type: self.distribution,
                s3_compression_type: self.compression,
            },
        })
    }
}

/// A data channel produced by the job container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    /// Channel name, assigned during normalization when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Path inside the container the job writes to
    pub source: String,
    /// Remote URI the output is uploaded to
    pub destination: String,
    #[serde(default)]
    pub kms_key_id: Option<String>,
    #[serde(default)]
    pub upload_mode: S3UploadMode,
}

impl OutputDescriptor {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            name: None,
            source: source.into(),
            destination: destination.into(),
            kms_key_id: None,
            upload_mode: S3UploadMode::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kms_key_id(mut self, kms_key_id: impl Into<String>) -> Self {
        self.kms_key_id = Some(kms_key_id.into());
        self
    }

    pub fn with_upload_mode(mut self, upload_mode: S3UploadMode) -> Self {
        self.upload_mode = upload_mode;
        self
    }

    /// Serializes this output into its wire fragment
    pub fn to_request_fragment(&self) -> ProcessingOutputFragment {
        ProcessingOutputFragment {
            output_name: self.name.clone(),
            s3_output: S3OutputFragment {
                s3_uri: self.destination.clone(),
                local_path: self.source.clone(),
                s3_upload_mode: self.upload_mode,
                kms_key_id: self.kms_key_id.clone(),
            },
        }
    }
}

/// One raw channel argument as supplied by a caller
///
/// Outputs accept both variants; a bare path is expanded into a descriptor
/// during normalization. Inputs must always be descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Channel<D> {
    /// A bare path string
    Path(String),
    /// A fully typed descriptor
    Descriptor(D),
}

impl<D> Channel<D> {
    pub fn is_descriptor(&self) -> bool {
        matches!(self, Channel::Descriptor(_))
    }
}

impl From<InputDescriptor> for Channel<InputDescriptor> {
    fn from(descriptor: InputDescriptor) -> Self {
        Channel::Descriptor(descriptor)
    }
}

impl From<OutputDescriptor> for Channel<OutputDescriptor> {
    fn from(descriptor: OutputDescriptor) -> Self {
        Channel::Descriptor(descriptor)
    }
}

impl<D> From<&str> for Channel<D> {
    fn from(path: &str) -> Self {
        Channel::Path(path.to_string())
    }
}

impl<D> From<String> for Channel<D> {
    fn from(path: String) -> Self {
        Channel::Path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_fragment_defaults() {
        let input = InputDescriptor::new("s3://bucket/train", "/opt/ml/processing/train")
            .with_name("train");

        let value = serde_json::to_value(input.to_request_fragment().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "InputName": "train",
                "S3Input": {
                    "S3Uri": "s3://bucket/train",
                    "LocalPath": "/opt/ml/processing/train",
                    "S3DataType": "ManifestFile",
                    "S3InputMode": "File",
                    "S3DownloadMode": "Continuous",
                    "S3DataDistributionType": "FullyReplicated"
                }
            })
        );
    }

    #[test]
    fn test_gzip_requires_pipe_mode() {
        let input = InputDescriptor::new("s3://bucket/train", "/opt/train")
            .with_compression(S3CompressionType::Gzip);

        let err = input.to_request_fragment().unwrap_err();
        assert!(err.message().contains("Pipe"));

        let piped = input.with_input_mode(S3InputMode::Pipe);
        let value = serde_json::to_value(piped.to_request_fragment().unwrap()).unwrap();
        assert_eq!(value["S3Input"]["S3CompressionType"], "Gzip");
        assert_eq!(value["S3Input"]["S3InputMode"], "Pipe");
    }

    #[test]
    fn test_explicit_no_compression_is_sent() {
        let input = InputDescriptor::new("s3://bucket/train", "/opt/train")
            .with_compression(S3CompressionType::None);

        let value = serde_json::to_value(input.to_request_fragment().unwrap()).unwrap();
        assert_eq!(value["S3Input"]["S3CompressionType"], "None");
    }

    #[test]
    fn test_output_fragment_kms_key_only_when_set() {
        let output = OutputDescriptor::new("/opt/out", "s3://bucket/out").with_name("out");
        let value = serde_json::to_value(output.to_request_fragment()).unwrap();
        assert_eq!(
            value,
            json!({
                "OutputName": "out",
                "S3Output": {
                    "S3Uri": "s3://bucket/out",
                    "LocalPath": "/opt/out",
                    "S3UploadMode": "Continuous"
                }
            })
        );

        let encrypted = OutputDescriptor::new("/opt/out", "s3://bucket/out")
            .with_kms_key_id("key-1")
            .with_upload_mode(S3UploadMode::EndOfJob);
        let value = serde_json::to_value(encrypted.to_request_fragment()).unwrap();
        assert_eq!(value["S3Output"]["KmsKeyId"], "key-1");
        assert_eq!(value["S3Output"]["S3UploadMode"], "EndOfJob");
    }

    #[test]
    fn test_channel_deserializes_path_or_descriptor() {
        let channels: Vec<Channel<OutputDescriptor>> = serde_json::from_value(json!([
            "/opt/ml/processing/output",
            { "source": "/opt/eval", "destination": "s3://bucket/eval", "name": "evaluation" }
        ]))
        .unwrap();

        assert_eq!(
            channels[0],
            Channel::Path("/opt/ml/processing/output".to_string())
        );
        assert!(channels[1].is_descriptor());
    }
}
