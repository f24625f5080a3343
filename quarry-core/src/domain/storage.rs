//! Transfer policy enumerations for storage-backed channels
//!
//! Each variant maps to exactly one wire constant. Serde uses the variant
//! name, which is the wire constant; `as_str` exposes the same mapping for
//! logs and messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the channel URI refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum S3DataType {
    /// The URI names a manifest listing the objects to fetch
    #[default]
    ManifestFile,
    /// The URI is a key prefix; every object under it is fetched
    S3Prefix,
}

/// How input data reaches the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum S3InputMode {
    /// Batch: objects are copied to the container volume
    #[default]
    File,
    /// Streaming: objects are piped into the container
    Pipe,
}

/// When input data is downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum S3DownloadMode {
    #[default]
    Continuous,
    StartOfJob,
}

/// How input data is split across instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum S3DataDistributionType {
    /// Every instance receives the full data set
    #[default]
    FullyReplicated,
    /// Each instance receives a shard keyed by object name
    ShardedByS3Key,
}

/// Compression applied to input data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum S3CompressionType {
    None,
    /// Only valid together with [`S3InputMode::Pipe`]
    Gzip,
}

/// When output data is uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum S3UploadMode {
    #[default]
    Continuous,
    EndOfJob,
}

impl S3DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            S3DataType::ManifestFile => "ManifestFile",
            S3DataType::S3Prefix => "S3Prefix",
        }
    }
}

impl S3InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            S3InputMode::File => "File",
            S3InputMode::Pipe => "Pipe",
        }
    }
}

impl S3DownloadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            S3DownloadMode::Continuous => "Continuous",
            S3DownloadMode::StartOfJob => "StartOfJob",
        }
    }
}

impl S3DataDistributionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            S3DataDistributionType::FullyReplicated => "FullyReplicated",
            S3DataDistributionType::ShardedByS3Key => "ShardedByS3Key",
        }
    }
}

impl S3CompressionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            S3CompressionType::None => "None",
            S3CompressionType::Gzip => "Gzip",
        }
    }
}

impl S3UploadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            S3UploadMode::Continuous => "Continuous",
            S3UploadMode::EndOfJob => "EndOfJob",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    S3DataType,
    S3InputMode,
    S3DownloadMode,
    S3DataDistributionType,
    S3CompressionType,
    S3UploadMode,
);
