use async_trait::async_trait;
use mentor_core::Turn;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for CompletionError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::Http(error)
        }
    }
}

pub type Result<T> = std::result::Result<T, CompletionError>;

/// Stateless request/response boundary to the language-model provider.
///
/// The caller owns all persistence: a failure here must never lose already
/// stored user input, it only means no reply is produced for this attempt.
/// No retries; errors are final per attempt.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a reply for the conversation.
    ///
    /// `turns` are oldest-first, bounded by the caller to its context
    /// window, with the newest user message last.
    async fn complete(&self, system_prompt: &str, turns: &[Turn]) -> Result<String>;
}
