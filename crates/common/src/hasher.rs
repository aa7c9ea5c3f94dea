use std::fmt;
use std::str::FromStr;

use cid::Cid;
use multihash::Multihash;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Multicodec for raw bytes, used for every pinned item
pub const RAW_CODEC: u64 = 0x55;
/// Multicodec for DAG-CBOR blocks, used for directory encodings
pub const DAG_CBOR_CODEC: u64 = 0x71;
/// Multihash code for sha2-256
pub const SHA2_256_CODE: u64 = 0x12;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("input of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    #[error("multihash error: {0}")]
    Multihash(#[from] multihash::Error),
}

/// A content identifier.
///
/// Always a CIDv1 over a sha2-256 multihash. Renders (and serializes)
///  as its base32 multibase string, so callers can treat it as an
///  opaque string key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(Cid);

impl ContentId {
    pub fn cid(&self) -> &Cid {
        &self.0
    }

    pub fn codec(&self) -> u64 {
        self.0.codec()
    }

    /// Whether this identifier addresses a directory encoding
    ///  rather than raw item bytes.
    pub fn is_directory(&self) -> bool {
        self.codec() == DAG_CBOR_CODEC
    }
}

impl From<ContentId> for Cid {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ContentId {
    type Err = cid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Cid::try_from(s)?))
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Compute the content identifier of a raw byte sequence.
pub fn hash(data: &[u8]) -> Result<ContentId, HashError> {
    hash_block(RAW_CODEC, data)
}

/// Compute the content identifier of an already encoded block,
///  tagging it with `codec`.
pub fn hash_block(codec: u64, data: &[u8]) -> Result<ContentId, HashError> {
    let digest = Sha256::digest(data);
    let multihash = Multihash::<64>::wrap(SHA2_256_CODE, digest.as_slice())?;
    Ok(ContentId(Cid::new_v1(codec, multihash)))
}
