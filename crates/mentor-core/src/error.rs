//! Session store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("session '{0}' already exists")]
    DuplicateSession(String),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
