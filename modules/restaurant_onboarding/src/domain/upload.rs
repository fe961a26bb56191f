//! Upload adapter
//!
//! Persists binary assets to a content store and returns the publicly
//! resolvable address of each stored object. Store implementations live in
//! infra/blob.rs.

use super::draft::BinaryAsset;
use async_trait::async_trait;
use bytes::Bytes;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Content store for binary assets
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write an object. Fails if the store rejects the write.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> anyhow::Result<()>;

    /// Public address of a stored object
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Destination store selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Images,
    Pdfs,
}

/// Bucket names per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    pub images: String,
    pub pdfs: String,
}

impl Default for Buckets {
    fn default() -> Self {
        Self {
            images: "restaurant-images".to_string(),
            pdfs: "restaurant-pdfs".to_string(),
        }
    }
}

impl Buckets {
    pub fn name(&self, kind: BucketKind) -> &str {
        match kind {
            BucketKind::Images => &self.images,
            BucketKind::Pdfs => &self.pdfs,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("store rejected upload of '{key}' to bucket '{bucket}'")]
    Rejected {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Uploads assets and tracks how many writes are in flight
pub struct Uploader {
    store: Arc<dyn BlobStore>,
    buckets: Buckets,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight counter on every exit path
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

impl Uploader {
    pub fn new(store: Arc<dyn BlobStore>, buckets: Buckets) -> Self {
        Self {
            store,
            buckets,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Store `asset` and return its public address.
    ///
    /// Without a `path` the key is `{millis}-{random}.{ext}`.
    pub async fn upload(
        &self,
        asset: &BinaryAsset,
        kind: BucketKind,
        path: Option<&str>,
    ) -> Result<String, UploadError> {
        let _guard = InFlight::enter(&self.in_flight);
        let bucket = self.buckets.name(kind);
        let key = match path {
            Some(path) => path.to_string(),
            None => default_key(asset),
        };

        tracing::debug!(
            bucket,
            key = %key,
            size = asset.len(),
            content_type = %asset.content_type,
            "uploading asset"
        );

        self.store
            .put(bucket, &key, asset.bytes.clone(), &asset.content_type)
            .await
            .map_err(|source| UploadError::Rejected {
                bucket: bucket.to_string(),
                key: key.clone(),
                source,
            })?;

        Ok(self.store.public_url(bucket, &key))
    }
}

/// Collision-avoiding key scoped by the asset's original extension
pub fn default_key(asset: &BinaryAsset) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..11)
        .map(|_| KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())] as char)
        .collect();
    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        suffix,
        asset.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_keeps_extension() {
        let asset = BinaryAsset::new("storefront.png", "image/png", vec![1u8]);
        let key = default_key(&asset);
        assert!(key.ends_with(".png"));

        let (millis, rest) = key.split_once('-').unwrap_or_default();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(rest.len(), "xxxxxxxxxxx.png".len());
    }

    struct HeldStore(tokio::sync::Semaphore);

    #[async_trait]
    impl BlobStore for HeldStore {
        async fn put(&self, _: &str, _: &str, _: Bytes, _: &str) -> anyhow::Result<()> {
            let _permit = self.0.acquire().await?;
            Ok(())
        }

        fn public_url(&self, bucket: &str, key: &str) -> String {
            format!("https://cdn.test/{bucket}/{key}")
        }
    }

    #[tokio::test]
    async fn in_flight_upload_is_observable() {
        let store = Arc::new(HeldStore(tokio::sync::Semaphore::new(0)));
        let uploader = Arc::new(Uploader::new(store.clone(), Buckets::default()));
        assert!(!uploader.is_uploading());

        let task = {
            let uploader = uploader.clone();
            tokio::spawn(async move {
                let asset = BinaryAsset::new("menu.pdf", "application/pdf", vec![1u8]);
                uploader.upload(&asset, BucketKind::Pdfs, Some("menus/1-menu")).await
            })
        };
        while !uploader.is_uploading() {
            tokio::task::yield_now().await;
        }

        store.0.add_permits(1);
        let url = task.await.unwrap().unwrap();
        assert_eq!(url, "https://cdn.test/restaurant-pdfs/menus/1-menu");
        assert!(!uploader.is_uploading());
    }

    #[test]
    fn default_keys_differ() {
        let asset = BinaryAsset::new("a.jpg", "image/jpeg", vec![1u8]);
        assert_ne!(default_key(&asset), default_key(&asset));
    }
}
