/**
 * Content identifiers.
 *  Maps bytes to CIDv1 (sha2-256) identifiers,
 *  the one hashing scheme used everywhere in the service.
 */
pub mod hasher;
/**
 * Directory identifiers.
 *  Derives a single CID for a set of named items,
 *  independent of the order they were submitted in.
 */
pub mod directory;
/**
 * Content items and the one-or-many upload shape
 *  handed to the pinner by the request layer.
 */
pub mod content;
/**
 * Pin orchestration: hash, address, write, respond.
 */
pub mod pin;

pub use object_store;

pub mod prelude {
    pub use crate::content::{ContentItem, Upload};
    pub use crate::directory::{build_directory_id, DirectoryEntry, DirectoryError};
    pub use crate::hasher::{hash, ContentId, HashError};
    pub use crate::pin::{PinError, PinLimits, PinResult, Pinner};
    pub use object_store::{ObjectStoreConfig, ObjectWriter, Storage, StoreError};
}
