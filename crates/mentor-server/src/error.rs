use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mentor_core::StoreError;
use mentor_llm::CompletionError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = ChatError> = std::result::Result<T, E>;

/// The closed set of outcomes every handler deals in.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("a session already exists for this privateID")]
    AlreadyExists,

    #[error("no session exists for this privateID")]
    SessionNotFound,

    #[error("completion provider error: {0}")]
    Upstream(String),

    #[error("storage error: {0}")]
    Store(String),
}

impl From<StoreError> for ChatError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateSession(_) => ChatError::AlreadyExists,
            StoreError::SessionNotFound(_) => ChatError::SessionNotFound,
            other => ChatError::Store(other.to_string()),
        }
    }
}

impl From<CompletionError> for ChatError {
    fn from(error: CompletionError) -> Self {
        ChatError::Upstream(error.to_string())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

impl ResponseError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::Validation(_) => StatusCode::BAD_REQUEST,
            ChatError::AlreadyExists => StatusCode::CONFLICT,
            ChatError::SessionNotFound => StatusCode::NOT_FOUND,
            ChatError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ChatError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}
