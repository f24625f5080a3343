//! Object store uploads over HTTP
//!
//! Objects are written with `PUT {base_url}/{bucket}/{key}`, each path
//! segment percent-encoded. A directory is
//! uploaded file by file, each one keyed by its path relative to the
//! directory; a single file is keyed by its file name. Either way the data ends
//! up under the prefix named by the desired URI, which is what gets returned.

use async_trait::async_trait;
use quarry_core::uri::{is_remote_uri, split_remote_uri};
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::service::Uploader;

/// HTTP implementation of [`Uploader`]
#[derive(Debug, Clone)]
pub struct HttpUploader {
    base_url: String,
    client: Client,
}

impl HttpUploader {
    /// Creates a new uploader
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the object store gateway
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// URL of one object, with the bucket and every key segment percent-encoded
    fn object_url(&self, bucket: &str, key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!(
                "Invalid storage endpoint {}: {}",
                self.base_url, e
            ))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "Storage endpoint cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(bucket)
            .extend(key.split('/'));

        Ok(url)
    }

    /// Writes one object
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        let url = self.object_url(bucket, key)?;
        debug!("PUT {} ({} bytes)", url, body.len());

        let response = self.client.put(url).body(body).send().await?;
        crate::check_status(response).await.map(|_| ())
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, local_path: &Path, desired_uri: &str) -> Result<String> {
        let (bucket, prefix) = split_remote_uri(desired_uri).ok_or_else(|| {
            ClientError::InvalidRequest(format!("Not a remote storage URI: {}", desired_uri))
        })?;

        if is_remote_uri(&local_path.to_string_lossy()) {
            return Err(ClientError::InvalidRequest(format!(
                "Upload source must be a local path: {}",
                local_path.display()
            )));
        }

        let files = collect_files(local_path).await?;
        info!(
            "Uploading {} file(s) from {} to {}",
            files.len(),
            local_path.display(),
            desired_uri
        );

        for (relative, absolute) in files {
            let body = tokio::fs::read(&absolute)
                .await
                .map_err(|e| ClientError::io(&absolute, e))?;
            let key = object_key(prefix, &relative);
            self.put_object(bucket, &key, body).await?;
        }

        Ok(desired_uri.to_string())
    }
}

/// Joins a key prefix and a relative path with forward slashes
fn object_key(prefix: &str, relative: &Path) -> String {
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    if prefix.is_empty() {
        relative
    } else {
        format!("{}/{}", prefix, relative)
    }
}

/// Lists every file under `root` as `(relative path, absolute path)`
///
/// A plain file yields a single entry keyed by its file name.
async fn collect_files(root: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let metadata = tokio::fs::metadata(root)
        .await
        .map_err(|e| ClientError::io(root, e))?;

    if !metadata.is_dir() {
        let name = root.file_name().map(PathBuf::from).ok_or_else(|| {
            ClientError::InvalidRequest(format!("No file name in {}", root.display()))
        })?;
        return Ok(vec![(name, root.to_path_buf())]);
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| ClientError::io(&dir, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ClientError::io(&dir, e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| ClientError::io(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(root) {
                files.push((relative.to_path_buf(), path.clone()));
            }
        }
    }

    files.sort();
    Ok(files)
}
