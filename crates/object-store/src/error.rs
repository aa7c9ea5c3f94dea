//! Error types for the object store.

/// Errors that can occur when writing to or reading from object storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Object storage error
    #[error("object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Key does not form a valid object path
    #[error("invalid object key '{0}'")]
    InvalidKey(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// S3 bucket not found - must be created before use
    #[error("S3 bucket '{0}' does not exist. Create it before starting the service.")]
    BucketNotFound(String),

    /// A sink rejected the write for a reason of its own
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Result type alias for object store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
