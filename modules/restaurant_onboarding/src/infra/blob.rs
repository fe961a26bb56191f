//! Content store implementations
//!
//! `FsBlobStore` writes under a local directory and serves addresses from a
//! configured base URL. `HttpBlobStore` talks to a Supabase-compatible
//! storage API. Neither overwrites an existing object.

use crate::domain::upload::BlobStore;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

/// Reject keys that would escape the bucket directory
fn checked_key(key: &str) -> Result<&Path> {
    let path = Path::new(key);
    if key.is_empty() || !path.components().all(|c| matches!(c, Component::Normal(_))) {
        bail!("invalid object key '{key}'");
    }
    Ok(path)
}

fn join_url(base: &Url, segments: &[&str]) -> String {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.extend(segment.split('/'));
        }
    }
    url.to_string()
}

// ===== Filesystem Store =====

pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: Url,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: Url) -> Self {
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        Ok(self.root.join(checked_key(bucket)?).join(checked_key(key)?))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .with_context(|| format!("failed to create object {}", path.display()))?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!(bucket, key, content_type, size = bytes.len(), "object written to disk");
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        join_url(&self.public_base_url, &[bucket, key])
    }
}

// ===== HTTP Storage API =====

pub struct HttpBlobStore {
    base_url: Url,
    api_key: String,
    client: reqwest::Client,
}

impl HttpBlobStore {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        join_url(&self.base_url, &["storage/v1/object", bucket, key])
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        checked_key(key)?;
        let url = self.object_url(bucket, key);
        let size = bytes.len();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .with_context(|| format!("failed to send upload request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("storage API returned {status}: {body}"));
        }

        debug!(bucket, key, size, "object uploaded");
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        join_url(&self.base_url, &["storage/v1/object/public", bucket, key])
    }
}
