use std::sync::Arc;

use bytes::Bytes;

use crate::error::Result;
use crate::sink::ObjectSink;

/// Writes content-addressed objects to a primary store, mirroring each
///  write into an optional cache.
///
/// The primary store is authoritative: its failure fails the write.
///  The cache is best-effort: its failure is logged and swallowed.
#[derive(Debug, Clone)]
pub struct ObjectWriter {
    primary: Arc<dyn ObjectSink>,
    cache: Option<Arc<dyn ObjectSink>>,
}

impl ObjectWriter {
    pub fn new(primary: impl ObjectSink) -> Self {
        Self {
            primary: Arc::new(primary),
            cache: None,
        }
    }

    /// Mirror every write into `cache` after the primary write lands.
    pub fn with_cache(mut self, cache: impl ObjectSink) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Persist `body` under `key`.
    ///
    /// Keys are content-derived, so writing the same key twice writes the
    ///  same bytes twice and is safe to repeat.
    #[tracing::instrument(skip(self, body), fields(size = body.len()))]
    pub async fn write(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        self.primary.put(key, body.clone(), content_type).await?;
        tracing::debug!("object written to primary store");

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(key, body, content_type).await {
                tracing::warn!(error = %e, "cache write failed, continuing");
            }
        }

        Ok(())
    }
}
