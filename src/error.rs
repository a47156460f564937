use thiserror::Error;

/// Errors raised by the local key-value store and the typed repository on top of it.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt store file: {0}")]
    CorruptFile(#[from] serde_json::Error),
    #[error("Failed to decode record `{key}`: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    #[error("Failed to encode store file: {0}")]
    EncodeFile(serde_json::Error),
    #[error("Failed to encode record `{key}`: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors shared by every record actor and its clients.
#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error("{0} actor closed")]
    ActorClosed(&'static str),
    #[error("{0} actor dropped the response")]
    ActorDropped(&'static str),
    #[error("No {0} record")]
    NotFound(&'static str),
    #[error("{operation} is not supported for {record} records")]
    Unsupported {
        record: &'static str,
        operation: &'static str,
    },
    #[error("Unexpected result from {0} actor")]
    UnexpectedResult(&'static str),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
