use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Anything that can durably accept a keyed object.
///
/// Implementations must tolerate concurrent puts to different keys, and
///  repeated puts of identical bytes to the same key. Keys are derived
///  from content, so a repeated put is always an overwrite with the same
///  bytes and never needs coordination.
#[async_trait]
pub trait ObjectSink: Send + Sync + Debug + 'static {
    /// Store `body` under `key`, recording `content_type` if the
    ///  backend supports it.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<()>;
}
