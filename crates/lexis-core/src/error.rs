use std::error::Error as StdError;

/// Errors surfaced by [`crate::lookup::SearchEngine::search`]
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Dictionary group not found: {0}")]
    GroupNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by a dictionary store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown dictionary: {0}")]
    UnknownDictionary(String),

    #[error("Dictionary already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid dictionary name: {0:?}")]
    InvalidName(String),

    #[error("Invalid row in {dictionary}: {reason}")]
    InvalidRow { dictionary: String, reason: String },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl StdError + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

/// Errors raised while loading a conjugation data file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
