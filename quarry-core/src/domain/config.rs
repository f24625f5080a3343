//! Processing job configuration
//!
//! The parameters shared by every job an orchestrator submits: where the
//! container runs, which image it runs, and under which identity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dto::processing::{NetworkConfigFragment, VpcConfigFragment};

/// Default size of the attached processing volume
pub const DEFAULT_VOLUME_SIZE_GB: u32 = 30;

/// Default upper bound on job runtime (one day)
pub const DEFAULT_MAX_RUNTIME_SECONDS: u64 = 24 * 60 * 60;

/// Job parameters owned by the caller
///
/// Read-only once handed to an orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfiguration {
    /// Execution role identity the job runs as
    pub role: String,
    pub image_uri: String,
    pub instance_type: String,
    pub instance_count: u32,
    pub volume_size_gb: u32,
    pub volume_kms_key: Option<String>,
    pub max_runtime_seconds: u64,
    /// Prefix for generated job names; derived from the image when unset
    pub base_job_name: Option<String>,
    pub env: Option<HashMap<String, String>>,
    pub tags: Option<Vec<Tag>>,
    pub network_config: Option<NetworkConfig>,
    pub entrypoint: Option<Vec<String>>,
    pub arguments: Option<Vec<String>>,
}

impl ProcessingConfiguration {
    /// Creates a configuration with default volume size and runtime
    pub fn new(
        role: impl Into<String>,
        image_uri: impl Into<String>,
        instance_type: impl Into<String>,
        instance_count: u32,
    ) -> Self {
        Self {
            role: role.into(),
            image_uri: image_uri.into(),
            instance_type: instance_type.into(),
            instance_count,
            volume_size_gb: DEFAULT_VOLUME_SIZE_GB,
            volume_kms_key: None,
            max_runtime_seconds: DEFAULT_MAX_RUNTIME_SECONDS,
            base_job_name: None,
            env: None,
            tags: None,
            network_config: None,
            entrypoint: None,
            arguments: None,
        }
    }

    pub fn with_volume_size_gb(mut self, volume_size_gb: u32) -> Self {
        self.volume_size_gb = volume_size_gb;
        self
    }

    pub fn with_volume_kms_key(mut self, key: impl Into<String>) -> Self {
        self.volume_kms_key = Some(key.into());
        self
    }

    pub fn with_max_runtime_seconds(mut self, seconds: u64) -> Self {
        self.max_runtime_seconds = seconds;
        self
    }

    pub fn with_base_job_name(mut self, base_job_name: impl Into<String>) -> Self {
        self.base_job_name = Some(base_job_name.into());
        self
    }

    /// Adds one environment variable, replacing any previous value for `key`
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(Tag {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_network_config(mut self, network_config: NetworkConfig) -> Self {
        self.network_config = Some(network_config);
        self
    }

    pub fn with_entrypoint<I, S>(mut self, entrypoint: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entrypoint = Some(entrypoint.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = Some(arguments.into_iter().map(Into::into).collect());
        self
    }
}

/// Resource tag attached to the job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Network isolation and VPC placement of the job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub enable_network_isolation: bool,
    pub encrypt_inter_container_traffic: Option<bool>,
    pub security_group_ids: Option<Vec<String>>,
    pub subnets: Option<Vec<String>>,
}

impl NetworkConfig {
    pub fn isolated() -> Self {
        Self {
            enable_network_isolation: true,
            ..Self::default()
        }
    }

    pub fn with_vpc(mut self, security_group_ids: Vec<String>, subnets: Vec<String>) -> Self {
        self.security_group_ids = Some(security_group_ids);
        self.subnets = Some(subnets);
        self
    }

    pub fn with_traffic_encryption(mut self, enabled: bool) -> Self {
        self.encrypt_inter_container_traffic = Some(enabled);
        self
    }

    /// Serializes the policy into its wire fragment
    ///
    /// The VPC block is only emitted when both security groups and subnets are set.
    pub fn to_request_fragment(&self) -> NetworkConfigFragment {
        let vpc_config = match (&self.security_group_ids, &self.subnets) {
            (Some(security_group_ids), Some(subnets)) => Some(VpcConfigFragment {
                security_group_ids: security_group_ids.clone(),
                subnets: subnets.clone(),
            }),
            _ => None,
        };

        NetworkConfigFragment {
            enable_network_isolation: self.enable_network_isolation,
            enable_inter_container_traffic_encryption: self.encrypt_inter_container_traffic,
            vpc_config,
        }
    }
}
