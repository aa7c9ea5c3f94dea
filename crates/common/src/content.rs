use bytes::Bytes;

use crate::pin::PinError;

/// Media type assumed for items that don't declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A single payload to pin: bytes plus whatever the client
///  told us about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    data: Bytes,
    name: Option<String>,
    content_type: Option<String>,
}

impl ContentItem {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            name: None,
            content_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared media type, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Declared media type, or [`DEFAULT_CONTENT_TYPE`]
    pub fn content_type_or_default(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A file upload, normalized once at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upload {
    /// Exactly one file, pinned under its own CID
    Single(ContentItem),
    /// Several files, pinned together under a directory CID
    Many(Vec<ContentItem>),
}

impl Upload {
    /// Sort a list of uploaded items into the single or many case.
    pub fn from_items(mut items: Vec<ContentItem>) -> Result<Self, PinError> {
        match items.len() {
            0 => Err(PinError::EmptyPayload),
            1 => Ok(Upload::Single(items.remove(0))),
            _ => Ok(Upload::Many(items)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Upload::Single(_) => 1,
            Upload::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<Vec<ContentItem>> for Upload {
    type Error = PinError;

    fn try_from(items: Vec<ContentItem>) -> Result<Self, Self::Error> {
        Upload::from_items(items)
    }
}
