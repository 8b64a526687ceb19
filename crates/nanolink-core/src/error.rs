use thiserror::Error;

/// Result type for repository operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors raised at the repository boundary.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced to callers of the shortener service.
///
/// `CodeAlreadyExists` is retried internally when the code was produced by a
/// generator; for custom aliases it propagates unchanged.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
    #[error("short code already exists: {0}")]
    CodeAlreadyExists(String),
    #[error("code generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::CodeAlreadyExists(code),
            other => Self::Storage(other.to_string()),
        }
    }
}
