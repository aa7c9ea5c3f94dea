use std::collections::HashSet;

use bytes::Bytes;
use futures::stream::{FuturesUnordered, StreamExt};
use object_store::{ObjectWriter, StoreError};

use crate::content::{ContentItem, Upload};
use crate::directory::{build_directory_id, DirectoryEntry};
use crate::hasher::{hash, ContentId, HashError};

use super::error::PinError;
use super::result::{PinResult, DIRECTORY_CONTENT_TYPE, JSON_CONTENT_TYPE};

/// Largest single item we'll hash by default (100 MiB)
pub const DEFAULT_MAX_ITEM_SIZE: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLimits {
    /// Upper bound on the size of any one item (or JSON document)
    pub max_item_size: usize,
}

impl Default for PinLimits {
    fn default() -> Self {
        Self {
            max_item_size: DEFAULT_MAX_ITEM_SIZE,
        }
    }
}

/// Hashes, addresses and stores pinned content.
#[derive(Debug, Clone)]
pub struct Pinner {
    writer: ObjectWriter,
    limits: PinLimits,
}

impl Pinner {
    pub fn new(writer: ObjectWriter) -> Self {
        Self {
            writer,
            limits: PinLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PinLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &PinLimits {
        &self.limits
    }

    pub fn writer(&self) -> &ObjectWriter {
        &self.writer
    }

    /// Pin a JSON document under the CID of its serialized form.
    ///
    /// The document is serialized compactly with keys in the order they
    ///  appear in the value, so two documents differing only in key
    ///  order get different identifiers.
    #[tracing::instrument(skip_all)]
    pub async fn pin_json(&self, document: &serde_json::Value) -> Result<PinResult, PinError> {
        let result = self.pin_json_inner(document).await;
        if let Err(e) = &result {
            log_failure(e);
        }
        result
    }

    async fn pin_json_inner(&self, document: &serde_json::Value) -> Result<PinResult, PinError> {
        let content = serde_json::to_vec(document).map_err(|e| PinError::Encode(e.to_string()))?;
        self.check_size(content.len())?;

        let cid = hash(&content)?;
        let size = content.len() as u64;

        self.writer
            .write(&cid.to_string(), Bytes::from(content), JSON_CONTENT_TYPE)
            .await?;

        tracing::info!(cid = %cid, size, "pinned JSON document");
        Ok(PinResult {
            identifier: cid,
            content_type: JSON_CONTENT_TYPE.to_string(),
            size,
        })
    }

    /// Pin one or many files.
    ///
    /// One file is stored under its own CID. Several files are stored
    ///  under `{directory}/{item}`, where `directory` is derived from the
    ///  names and CIDs of every item.
    #[tracing::instrument(skip_all, fields(items = upload.len()))]
    pub async fn pin_files(&self, upload: Upload) -> Result<PinResult, PinError> {
        let result = match upload {
            Upload::Single(item) => self.pin_single(item).await,
            Upload::Many(items) => match Upload::from_items(items)? {
                Upload::Single(item) => self.pin_single(item).await,
                Upload::Many(items) => self.pin_directory(items).await,
            },
        };

        if let Err(e) = &result {
            log_failure(e);
        }
        result
    }

    async fn pin_single(&self, item: ContentItem) -> Result<PinResult, PinError> {
        self.check_size(item.size())?;

        let cid = hash(item.data())?;
        let content_type = item.content_type_or_default().to_string();
        let size = item.size() as u64;

        self.writer
            .write(&cid.to_string(), item.data().clone(), &content_type)
            .await?;

        tracing::info!(cid = %cid, %content_type, size, "pinned file");
        Ok(PinResult {
            identifier: cid,
            content_type,
            size,
        })
    }

    async fn pin_directory(&self, items: Vec<ContentItem>) -> Result<PinResult, PinError> {
        for item in &items {
            self.check_size(item.size())?;
        }

        // every item cid must be known before the directory can be
        //  addressed, and names must be unique before anything is written
        let mut members: Vec<(String, ContentId, ContentItem)> = Vec::with_capacity(items.len());
        let mut unnamed: HashSet<ContentId> = HashSet::new();
        for item in items {
            let cid = hash(item.data())?;
            let name = match item.name() {
                Some(name) => name.to_string(),
                // identical unnamed items are one member under one key
                None if !unnamed.insert(cid) => continue,
                None => cid.to_string(),
            };
            members.push((name, cid, item));
        }

        if members.len() == 1 {
            if let Some((_, _, item)) = members.pop() {
                return self.pin_single(item).await;
            }
        }

        let entries = members
            .iter()
            .map(|(name, cid, _)| DirectoryEntry::new(name.clone(), *cid))
            .collect();
        let directory = build_directory_id(entries)?;
        let size: u64 = members.iter().map(|(_, _, item)| item.size() as u64).sum();

        // spawned writes outlive this call if we bail early, dropping a
        //  JoinHandle detaches the task rather than aborting it
        let mut writes: FuturesUnordered<_> = members
            .into_iter()
            .map(|(name, cid, item)| {
                let writer = self.writer.clone();
                let key = format!("{}/{}", directory, cid);
                let handle = tokio::spawn(async move {
                    writer
                        .write(&key, item.data().clone(), item.content_type_or_default())
                        .await
                });
                async move { (name, handle.await) }
            })
            .collect();

        while let Some((item_name, joined)) = writes.next().await {
            let outcome = joined.unwrap_or_else(|e| Err(StoreError::Io(e.into())));
            if let Err(cause) = outcome {
                return Err(PinError::PartialWriteFailure { item_name, cause });
            }
        }

        tracing::info!(cid = %directory, size, "pinned directory");
        Ok(PinResult {
            identifier: directory,
            content_type: DIRECTORY_CONTENT_TYPE.to_string(),
            size,
        })
    }

    fn check_size(&self, size: usize) -> Result<(), PinError> {
        if size > self.limits.max_item_size {
            return Err(HashError::TooLarge {
                size,
                limit: self.limits.max_item_size,
            }
            .into());
        }
        Ok(())
    }
}

/// Rejected requests log at `warn`, failures on our side at `error`
fn log_failure(e: &PinError) {
    if e.is_invalid_request() {
        tracing::warn!(error = %e, "pin rejected");
    } else {
        tracing::error!(error = %e, "pin failed");
    }
}

#[cfg(test)]
mod test {
    use object_store::Storage;
    use serde_json::json;

    use super::*;

    fn pinner() -> (Pinner, Storage) {
        let storage = Storage::memory();
        (Pinner::new(ObjectWriter::new(storage.clone())), storage)
    }

    #[tokio::test]
    async fn test_json_size_is_serialized_length() {
        let (pinner, _) = pinner();

        let result = pinner.pin_json(&json!({"a": 1})).await.unwrap();
        assert_eq!(result.size, br#"{"a":1}"#.len() as u64);
        assert_eq!(result.content_type, JSON_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_many_with_one_item_pins_single() {
        let (pinner, storage) = pinner();

        let result = pinner
            .pin_files(Upload::Many(vec![ContentItem::new("hi").with_name("a.txt")]))
            .await
            .unwrap();
        let cid = hash(b"hi").unwrap();
        assert_eq!(result.identifier, cid);
        assert_eq!(storage.list(None).await.unwrap(), vec![cid.to_string()]);
    }

    #[tokio::test]
    async fn test_many_with_no_items_is_empty() {
        let (pinner, _) = pinner();

        let result = pinner.pin_files(Upload::Many(vec![])).await;
        assert!(matches!(result, Err(PinError::EmptyPayload)));
    }

    #[tokio::test]
    async fn test_oversized_item_rejected_before_write() {
        let (pinner, storage) = pinner();
        let pinner = pinner.with_limits(PinLimits { max_item_size: 4 });

        let result = pinner
            .pin_files(
                Upload::from_items(vec![
                    ContentItem::new("ok").with_name("a"),
                    ContentItem::new("too large").with_name("b"),
                ])
                .unwrap(),
            )
            .await;

        let err = result.unwrap_err();
        assert!(err.is_invalid_request());
        assert!(matches!(
            err,
            PinError::Hashing(HashError::TooLarge { size: 9, limit: 4 })
        ));
        assert!(storage.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unnamed_items_are_named_by_cid() {
        let (pinner, _) = pinner();

        let result = pinner
            .pin_files(
                Upload::from_items(vec![ContentItem::new("hi"), ContentItem::new("bye")]).unwrap(),
            )
            .await
            .unwrap();

        let expected = build_directory_id(vec![
            DirectoryEntry::new(hash(b"hi").unwrap().to_string(), hash(b"hi").unwrap()),
            DirectoryEntry::new(hash(b"bye").unwrap().to_string(), hash(b"bye").unwrap()),
        ])
        .unwrap();
        assert_eq!(result.identifier, expected);
    }

    #[tokio::test]
    async fn test_identical_unnamed_items_collapse() {
        let (pinner, storage) = pinner();

        let result = pinner
            .pin_files(
                Upload::from_items(vec![ContentItem::new("same"), ContentItem::new("same")])
                    .unwrap(),
            )
            .await
            .unwrap();

        let cid = hash(b"same").unwrap();
        assert_eq!(result.identifier, cid);
        assert_eq!(result.size, 4);
        assert_eq!(storage.list(None).await.unwrap(), vec![cid.to_string()]);
    }

    #[tokio::test]
    async fn test_identical_unnamed_items_share_one_entry() {
        let (pinner, storage) = pinner();

        let result = pinner
            .pin_files(
                Upload::from_items(vec![
                    ContentItem::new("same"),
                    ContentItem::new("other").with_name("other.txt"),
                    ContentItem::new("same"),
                ])
                .unwrap(),
            )
            .await
            .unwrap();

        let same = hash(b"same").unwrap();
        let expected = build_directory_id(vec![
            DirectoryEntry::new(same.to_string(), same),
            DirectoryEntry::new("other.txt", hash(b"other").unwrap()),
        ])
        .unwrap();
        assert_eq!(result.identifier, expected);
        assert_eq!(result.size, 9);
        assert_eq!(storage.list(None).await.unwrap().len(), 2);
    }
}
