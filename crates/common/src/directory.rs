use cid::Cid;

use crate::hasher::{hash_block, ContentId, HashError, DAG_CBOR_CODEC};

/**
 * Directories
 * ===========
 * A directory is a set of named items addressed as one unit.
 *  Its identifier is the CID of a canonical encoding of the set:
 *  - entries are sorted by name, byte-wise
 *  - the sorted list is DAG-CBOR encoded as an array of
 *     `[name, cid]` pairs, names as text strings and cids as
 *     tag-42 links
 *  - the encoding is hashed as a DAG-CBOR block
 * CBOR strings and links are length-prefixed, so no name can
 *  forge an entry boundary. Changing any of the above changes
 *  every directory identifier ever issued.
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: String,
    cid: ContentId,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, cid: ContentId) -> Self {
        Self {
            name: name.into(),
            cid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cid(&self) -> &ContentId {
        &self.cid
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory has no entries")]
    Empty,
    #[error("duplicate entry name '{0}'")]
    DuplicateEntryName(String),
    #[error("failed to encode directory: {0}")]
    Encode(String),
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Derive the identifier for a set of entries.
///
/// A single entry is its own identifier: it is returned as-is and never
///  wrapped in a directory encoding.
pub fn build_directory_id(mut entries: Vec<DirectoryEntry>) -> Result<ContentId, DirectoryError> {
    match entries.len() {
        0 => return Err(DirectoryError::Empty),
        1 => return Ok(entries[0].cid),
        _ => {}
    }

    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    if let Some(pair) = entries.windows(2).find(|pair| pair[0].name == pair[1].name) {
        return Err(DirectoryError::DuplicateEntryName(pair[0].name.clone()));
    }

    let block = encode_sorted(&entries)?;
    Ok(hash_block(DAG_CBOR_CODEC, &block)?)
}

fn encode_sorted(entries: &[DirectoryEntry]) -> Result<Vec<u8>, DirectoryError> {
    let pairs: Vec<(&str, &Cid)> = entries
        .iter()
        .map(|entry| (entry.name.as_str(), entry.cid.cid()))
        .collect();
    serde_ipld_dagcbor::to_vec(&pairs).map_err(|e| DirectoryError::Encode(e.to_string()))
}
