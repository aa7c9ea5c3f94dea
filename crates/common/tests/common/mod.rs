//! Shared test utilities for pinning integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use ::common::object_store::{ObjectSink, ObjectWriter, Result, Storage, StoreError};
use ::common::pin::Pinner;

/// Set up a pinner over a fresh in-memory store
pub fn setup_pinner() -> (Pinner, Storage) {
    let storage = Storage::memory();
    let pinner = Pinner::new(ObjectWriter::new(storage.clone()));
    (pinner, storage)
}

/// A sink that counts puts and forwards them to a store
#[derive(Debug, Clone)]
pub struct CountingSink {
    pub storage: Storage,
    pub puts: Arc<AtomicUsize>,
}

impl CountingSink {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            puts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectSink for CountingSink {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.storage.put(key, body, content_type).await
    }
}

/// A sink that refuses any object whose bytes match `poison`,
///  and stores everything else
#[derive(Debug, Clone)]
pub struct PoisonedSink {
    pub storage: Storage,
    pub poison: Bytes,
}

#[async_trait]
impl ObjectSink for PoisonedSink {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        if body == self.poison {
            return Err(StoreError::Rejected(format!("poisoned object {}", key)));
        }
        self.storage.put(key, body, content_type).await
    }
}

/// Like [`PoisonedSink`], but every write it accepts lands only after
///  `delay`, while the poisoned one fails at once
#[derive(Debug, Clone)]
pub struct DelayedSink {
    pub storage: Storage,
    pub poison: Bytes,
    pub delay: Duration,
}

#[async_trait]
impl ObjectSink for DelayedSink {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        if body == self.poison {
            return Err(StoreError::Rejected(format!("poisoned object {}", key)));
        }
        tokio::time::sleep(self.delay).await;
        self.storage.put(key, body, content_type).await
    }
}
