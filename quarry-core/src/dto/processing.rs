//! Processing job submission payload

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::config::Tag;
use crate::domain::storage::{
    S3CompressionType, S3DataDistributionType, S3DataType, S3DownloadMode, S3InputMode,
    S3UploadMode,
};

/// Request body for creating a processing job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessingRequest {
    pub input_data_config: Vec<ProcessingInputFragment>,
    pub output_data_config: Vec<ProcessingOutputFragment>,
    pub processing_job_name: String,
    pub processing_resources: ProcessingResources,
    pub stopping_condition: StoppingCondition,
    pub app_specification: AppSpecification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<HashMap<String, String>>,
    /// Always present on the wire, `null` when no policy is configured
    pub network_config: Option<NetworkConfigFragment>,
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// One input channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessingInputFragment {
    pub input_name: Option<String>,
    pub s3_input: S3InputFragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3InputFragment {
    pub s3_uri: String,
    pub local_path: String,
    pub s3_data_type: S3DataType,
    pub s3_input_mode: S3InputMode,
    pub s3_download_mode: S3DownloadMode,
    pub s3_data_distribution_type: S3DataDistributionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_compression_type: Option<S3CompressionType>,
}

/// One output channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessingOutputFragment {
    pub output_name: Option<String>,
    pub s3_output: S3OutputFragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3OutputFragment {
    pub s3_uri: String,
    pub local_path: String,
    pub s3_upload_mode: S3UploadMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessingResources {
    pub cluster_config: ClusterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterConfig {
    pub instance_type: String,
    pub instance_count: u32,
    #[serde(rename = "VolumeSizeInGB")]
    pub volume_size_in_gb: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_kms_key_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoppingCondition {
    pub max_runtime_in_seconds: u64,
}

/// Container image and launch command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSpecification {
    pub image_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_arguments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_entrypoint: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkConfigFragment {
    pub enable_network_isolation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_inter_container_traffic_encryption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_config: Option<VpcConfigFragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfigFragment {
    pub security_group_ids: Vec<String>,
    pub subnets: Vec<String>,
}
