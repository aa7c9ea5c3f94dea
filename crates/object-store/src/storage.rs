//! Object storage backend abstraction (S3/MinIO/local filesystem/memory).

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::sink::ObjectSink;

/// Configuration for an object storage backend.
#[derive(Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectStoreConfig {
    /// In-memory storage (for testing)
    #[default]
    Memory,

    /// Local filesystem storage
    Local {
        /// Path to the storage directory
        path: PathBuf,
    },

    /// S3-compatible storage (AWS S3, MinIO, Filebase, etc.)
    S3 {
        /// S3 endpoint URL (e.g., "http://localhost:9000" for MinIO)
        endpoint: String,
        /// Access key ID
        access_key: String,
        /// Secret access key
        secret_key: String,
        /// Bucket name
        bucket: String,
        /// Optional region (defaults to "us-east-1")
        region: Option<String>,
    },
}

// Hand-written so credentials never end up in logs
impl fmt::Debug for ObjectStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectStoreConfig::Memory => f.write_str("Memory"),
            ObjectStoreConfig::Local { path } => f.debug_struct("Local").field("path", path).finish(),
            ObjectStoreConfig::S3 {
                endpoint,
                access_key,
                bucket,
                region,
                ..
            } => f
                .debug_struct("S3")
                .field("endpoint", endpoint)
                .field("access_key", access_key)
                .field("secret_key", &"<redacted>")
                .field("bucket", bucket)
                .field("region", region)
                .finish(),
        }
    }
}

/// Wrapper around different object storage backends.
#[derive(Debug, Clone)]
pub struct Storage {
    inner: Arc<dyn ObjectStore>,
    // the local filesystem backend has no notion of object attributes
    //  and rejects puts that carry any
    attributes: bool,
}

impl Storage {
    /// Create a new storage backend from configuration.
    pub async fn new(config: ObjectStoreConfig) -> Result<Self> {
        let (inner, attributes): (Arc<dyn ObjectStore>, bool) = match &config {
            ObjectStoreConfig::Memory => (Arc::new(InMemory::new()), true),

            ObjectStoreConfig::Local { path } => {
                // Ensure directory exists
                tokio::fs::create_dir_all(path).await?;
                let store = LocalFileSystem::new_with_prefix(path)
                    .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;
                (Arc::new(store), false)
            }

            ObjectStoreConfig::S3 {
                endpoint,
                access_key,
                secret_key,
                bucket,
                region,
            } => {
                let builder = AmazonS3Builder::new()
                    .with_endpoint(endpoint)
                    .with_access_key_id(access_key)
                    .with_secret_access_key(secret_key)
                    .with_bucket_name(bucket)
                    .with_region(region.as_deref().unwrap_or("us-east-1"))
                    .with_allow_http(endpoint.starts_with("http://"));

                let store: Arc<dyn ObjectStore> = Arc::new(
                    builder
                        .build()
                        .map_err(|e| StoreError::InvalidConfig(e.to_string()))?,
                );

                // Verify bucket exists by listing (empty prefix)
                // This will fail fast if the bucket doesn't exist
                {
                    use futures::TryStreamExt;
                    let prefix = ObjectPath::from("");
                    let mut stream = store.list(Some(&prefix));
                    match stream.try_next().await {
                        Ok(_) => {}
                        Err(object_store::Error::NotFound { .. }) => {
                            return Err(StoreError::BucketNotFound(bucket.clone()));
                        }
                        Err(e) => {
                            let msg = e.to_string();
                            if msg.contains("NoSuchBucket")
                                || msg.contains("bucket") && msg.contains("not")
                            {
                                return Err(StoreError::BucketNotFound(bucket.clone()));
                            }
                            return Err(e.into());
                        }
                    }
                }

                (store, true)
            }
        };

        tracing::debug!(?config, "object storage ready");
        Ok(Self { inner, attributes })
    }

    /// Create an in-memory storage backend.
    pub fn memory() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
            attributes: true,
        }
    }

    /// Keys are used verbatim as object paths, so they must already be
    ///  in canonical path form (no empty segments, no `.`/`..`).
    fn object_path(key: &str) -> Result<ObjectPath> {
        ObjectPath::parse(key).map_err(|_| StoreError::InvalidKey(key.to_string()))
    }

    /// Put an object into storage, overwriting anything under the same key.
    pub async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        let path = Self::object_path(key)?;
        let mut opts = PutOptions::default();
        if self.attributes {
            let mut attributes = Attributes::new();
            attributes.insert(
                Attribute::ContentType,
                AttributeValue::from(content_type.to_string()),
            );
            opts.attributes = attributes;
        }
        self.inner.put_opts(&path, body.into(), opts).await?;
        Ok(())
    }

    /// Get an object from storage.
    pub async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = Self::object_path(key)?;
        match self.inner.get(&path).await {
            Ok(result) => {
                let bytes = result.bytes().await?;
                Ok(Some(bytes))
            }
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the content type recorded for an object, if the backend
    ///  keeps one.
    pub async fn content_type(&self, key: &str) -> Result<Option<String>> {
        let path = Self::object_path(key)?;
        match self.inner.get(&path).await {
            Ok(result) => Ok(result
                .attributes
                .get(&Attribute::ContentType)
                .map(|value| value.to_string())),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if an object exists in storage.
    pub async fn has(&self, key: &str) -> Result<bool> {
        let path = Self::object_path(key)?;
        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// List every key in storage, optionally under a prefix, sorted.
    pub async fn list(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        use futures::TryStreamExt;

        let prefix = prefix.map(Self::object_path).transpose()?;
        let items: Vec<_> = self.inner.list(prefix.as_ref()).try_collect().await?;

        let mut keys: Vec<String> = items
            .into_iter()
            .map(|meta| meta.location.to_string())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl ObjectSink for Storage {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        Storage::put(self, key, body, content_type).await
    }
}
