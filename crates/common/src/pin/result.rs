use serde::{Deserialize, Serialize};

use crate::hasher::ContentId;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const DIRECTORY_CONTENT_TYPE: &str = "directory";

/// What a successful pin reports back.
///
/// `size` is the number of bytes that were hashed and stored: the
///  serialized document for JSON pins, the file length for single files,
///  and the summed member lengths for directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinResult {
    #[serde(rename = "cid")]
    pub identifier: ContentId,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
}
