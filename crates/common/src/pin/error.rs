use object_store::StoreError;

use crate::directory::DirectoryError;
use crate::hasher::HashError;

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("no content to pin")]
    EmptyPayload,
    #[error("duplicate entry name '{0}'")]
    DuplicateEntryName(String),
    #[error("hashing failed: {0}")]
    Hashing(#[from] HashError),
    #[error("failed to encode content: {0}")]
    Encode(String),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("failed to add file {item_name}: {cause}")]
    PartialWriteFailure {
        item_name: String,
        #[source]
        cause: StoreError,
    },
}

impl PinError {
    /// Whether the request itself was at fault, as opposed to
    ///  the service or its storage.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            PinError::EmptyPayload
                | PinError::DuplicateEntryName(_)
                | PinError::Hashing(HashError::TooLarge { .. })
        )
    }
}

impl From<DirectoryError> for PinError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Empty => PinError::EmptyPayload,
            DirectoryError::DuplicateEntryName(name) => PinError::DuplicateEntryName(name),
            DirectoryError::Encode(msg) => PinError::Encode(msg),
            DirectoryError::Hash(e) => PinError::Hashing(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_client_and_server_failures_are_told_apart() {
        assert!(PinError::EmptyPayload.is_invalid_request());
        assert!(PinError::DuplicateEntryName("a.txt".into()).is_invalid_request());
        assert!(PinError::from(HashError::TooLarge { size: 9, limit: 4 }).is_invalid_request());

        assert!(!PinError::Storage(StoreError::Rejected("down".into())).is_invalid_request());
        assert!(!PinError::PartialWriteFailure {
            item_name: "2.txt".into(),
            cause: StoreError::Rejected("down".into()),
        }
        .is_invalid_request());
        assert!(!PinError::Encode("bad".into()).is_invalid_request());
    }
}
