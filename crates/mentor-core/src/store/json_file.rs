use crate::chat::{ChatSession, Message, Sender};
use crate::error::{Result, StoreError};
use crate::store::{SessionCounts, SessionStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// File-backed session store: one JSON document per session.
///
/// Private ids are caller-supplied opaque tokens, so file names use their
/// hex encoding rather than the raw value. Mutations and count snapshots
/// serialize behind a store-wide write lock; reads of a single session go
/// straight to the file.
#[derive(Debug)]
pub struct JsonFileStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn session_path(&self, private_id: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.json", hex::encode(private_id)))
    }

    async fn load(&self, private_id: &str) -> Result<Option<ChatSession>> {
        let path = self.session_path(private_id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).await?;
        let session = serde_json::from_str(&contents)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &ChatSession) -> Result<()> {
        let path = self.session_path(&session.private_id);
        let contents = serde_json::to_string(session)?;
        fs::write(&path, contents).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn create(&self, session: ChatSession) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if self.session_path(&session.private_id).exists() {
            return Err(StoreError::DuplicateSession(session.private_id));
        }
        self.save(&session).await
    }

    async fn find(&self, private_id: &str) -> Result<Option<ChatSession>> {
        self.load(private_id).await
    }

    async fn append_message(
        &self,
        private_id: &str,
        content: String,
        sender: Sender,
        reply_to: Option<String>,
    ) -> Result<Message> {
        let _guard = self.write_lock.lock().await;
        let mut session = self
            .load(private_id)
            .await?
            .ok_or_else(|| StoreError::SessionNotFound(private_id.to_string()))?;
        let message = session.append_message(content, sender, reply_to);
        self.save(&session).await?;
        Ok(message)
    }

    async fn recent_history(
        &self,
        private_id: &str,
        limit: usize,
        before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>> {
        let session = self
            .load(private_id)
            .await?
            .ok_or_else(|| StoreError::SessionNotFound(private_id.to_string()))?;
        Ok(session.recent_messages(limit, before).to_vec())
    }

    async fn counts(&self) -> Result<SessionCounts> {
        let _guard = self.write_lock.lock().await;
        let mut counts = SessionCounts {
            total: 0,
            control: 0,
        };
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path).await?;
            match serde_json::from_str::<ChatSession>(&contents) {
                Ok(session) => {
                    counts.total += 1;
                    if session.is_control {
                        counts.control += 1;
                    }
                }
                Err(e) => {
                    log::warn!("skipping unreadable session file {:?}: {}", path, e);
                }
            }
        }
        Ok(counts)
    }
}
