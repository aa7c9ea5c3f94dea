//! Object storage for pinned content
//!
//! This crate provides the write side of the pinning service: pluggable
//! object storage (S3/MinIO/local filesystem/memory) and an [`ObjectWriter`]
//! that persists bytes under content-derived keys.
//!
//! # Features
//!
//! - Multiple storage backends: S3, MinIO, local filesystem, in-memory
//! - Content type recorded alongside each object where the backend allows it
//! - Idempotent writes: every key is derived from the bytes it holds
//! - Best-effort cache mirror next to the primary store
//!
//! # Example
//!
//! ```rust,no_run
//! use ipos_object_store::{ObjectStoreConfig, ObjectWriter, Storage};
//!
//! # async fn example() -> Result<(), ipos_object_store::StoreError> {
//! let primary = Storage::new(ObjectStoreConfig::Memory).await?;
//! let writer = ObjectWriter::new(primary);
//!
//! writer
//!     .write("bafkreiexample", "hello".into(), "text/plain")
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod sink;
mod storage;
mod writer;

pub use error::{Result, StoreError};
pub use sink::ObjectSink;
pub use storage::{ObjectStoreConfig, Storage};
pub use writer::ObjectWriter;
