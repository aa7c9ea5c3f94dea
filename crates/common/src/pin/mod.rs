//! Pin orchestration
//!
//! The [`Pinner`] turns a request payload into stored, addressed content:
//!
//! - **JSON documents** are serialized, hashed, and written under their CID
//! - **A single file** is hashed and written under its CID
//! - **Several files** are hashed individually, addressed together by a
//!   directory CID (see [`crate::directory`]), and written concurrently
//!   under `{directory}/{item}` keys
//!
//! Validation failures ([`PinError::EmptyPayload`],
//! [`PinError::DuplicateEntryName`], oversized items) are raised before any
//! write happens. A failed write in a multi-file pin fails the whole pin
//! with [`PinError::PartialWriteFailure`]; siblings already in flight are
//! left to finish, since every key is content-derived and safe to rewrite.

mod error;
mod pinner;
mod result;

pub use error::PinError;
pub use pinner::{PinLimits, Pinner, DEFAULT_MAX_ITEM_SIZE};
pub use result::{PinResult, DIRECTORY_CONTENT_TYPE, JSON_CONTENT_TYPE};
