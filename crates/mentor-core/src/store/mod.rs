//! Session storage trait and implementations

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::chat::{ChatSession, Message, Sender};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Aggregate counts the balancer reads at assignment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCounts {
    pub total: u64,
    pub control: u64,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a brand-new session. Fails with
    /// [`StoreError::DuplicateSession`](crate::error::StoreError::DuplicateSession)
    /// if the private id is already taken.
    async fn create(&self, session: ChatSession) -> Result<()>;

    /// Look up a session. Absence is `Ok(None)`, never an error.
    async fn find(&self, private_id: &str) -> Result<Option<ChatSession>>;

    /// Append a message with a server-assigned timestamp and return it.
    async fn append_message(
        &self,
        private_id: &str,
        content: String,
        sender: Sender,
        reply_to: Option<String>,
    ) -> Result<Message>;

    /// History read in chronological order: the tail window when `before` is
    /// absent, backward pagination otherwise. See
    /// [`ChatSession::recent_messages`].
    async fn recent_history(
        &self,
        private_id: &str,
        limit: usize,
        before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>>;

    /// Consistent snapshot of total and control session counts.
    async fn counts(&self) -> Result<SessionCounts>;
}
