use crate::chat::{ChatSession, Message, Sender};
use crate::error::{Result, StoreError};
use crate::store::{SessionCounts, SessionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory session store for tests and embedders that do not need
/// durability. Same contract as [`JsonFileStore`](crate::store::JsonFileStore).
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, ChatSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, session: ChatSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.private_id) {
            return Err(StoreError::DuplicateSession(session.private_id));
        }
        sessions.insert(session.private_id.clone(), session);
        Ok(())
    }

    async fn find(&self, private_id: &str) -> Result<Option<ChatSession>> {
        Ok(self.sessions.read().await.get(private_id).cloned())
    }

    async fn append_message(
        &self,
        private_id: &str,
        content: String,
        sender: Sender,
        reply_to: Option<String>,
    ) -> Result<Message> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(private_id)
            .ok_or_else(|| StoreError::SessionNotFound(private_id.to_string()))?;
        Ok(session.append_message(content, sender, reply_to))
    }

    async fn recent_history(
        &self,
        private_id: &str,
        limit: usize,
        before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(private_id)
            .ok_or_else(|| StoreError::SessionNotFound(private_id.to_string()))?;
        Ok(session.recent_messages(limit, before).to_vec())
    }

    async fn counts(&self) -> Result<SessionCounts> {
        let sessions = self.sessions.read().await;
        let total = sessions.len() as u64;
        let control = sessions.values().filter(|s| s.is_control).count() as u64;
        Ok(SessionCounts { total, control })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_matches_the_store_contract() {
        let store = MemoryStore::new();
        store
            .create(ChatSession::new("alpha", "prompt", Vec::new(), true))
            .await
            .unwrap();

        let err = store
            .create(ChatSession::new("alpha", "prompt", Vec::new(), false))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSession(_)));

        store
            .append_message("alpha", "hi".to_string(), Sender::User, None)
            .await
            .unwrap();
        let history = store.recent_history("alpha", 10, None).await.unwrap();
        assert_eq!(history.len(), 1);

        let counts = store.counts().await.unwrap();
        assert_eq!(
            counts,
            SessionCounts {
                total: 1,
                control: 1
            }
        );
    }
}
