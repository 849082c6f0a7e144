use crate::personality::TraitPole;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Role tag expected by the completion provider. Storage-level senders are
/// translated at the history boundary; the completion request itself adds
/// the `System` entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Assistant => Role::Assistant,
        }
    }
}

/// A role-tagged conversation turn, oldest-first when in a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    /// Weak reference to an earlier message in the same session. The target
    /// is never required to exist; a dangling id is tolerated, not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn to_turn(&self) -> Turn {
        Turn {
            role: self.sender.into(),
            content: self.content.clone(),
        }
    }
}

/// One participant's conversation, keyed by a caller-held opaque token.
///
/// Immutable after creation except for message appends; the arm assignment
/// (`is_control`) is fixed for the session's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub private_id: String,
    /// Resolved system prompt for this session.
    pub personality: String,
    /// Which pole the questionnaire selected per question, in question order.
    pub traits: Vec<TraitPole>,
    pub is_control: bool,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(
        private_id: impl Into<String>,
        personality: impl Into<String>,
        traits: Vec<TraitPole>,
        is_control: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            private_id: private_id.into(),
            personality: personality.into(),
            traits,
            is_control,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message with a server-assigned timestamp.
    ///
    /// Timestamps are strictly increasing within a session: a same-instant
    /// append is advanced one microsecond past its predecessor, so the tail
    /// window and before-timestamp pagination chain without gaps or overlap.
    pub fn append_message(
        &mut self,
        content: impl Into<String>,
        sender: Sender,
        reply_to: Option<String>,
    ) -> Message {
        let now = Utc::now();
        let created_at = match self.messages.last() {
            Some(prev) if now <= prev.created_at => prev.created_at + Duration::microseconds(1),
            _ => now,
        };
        let message = Message {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            reply_to,
            created_at,
        };
        self.messages.push(message.clone());
        self.updated_at = created_at;
        message
    }

    /// Messages for a history read, in chronological order.
    ///
    /// Without `before` this is the tail window: the most recent `limit`
    /// messages. With `before` it is backward pagination: the most recent
    /// `limit` messages whose timestamp is strictly earlier than `before`.
    pub fn recent_messages(&self, limit: usize, before: Option<DateTime<Utc>>) -> &[Message] {
        let window: &[Message] = match before {
            // Timestamps are strictly increasing, so partition_point finds
            // the first message at or past the cursor.
            Some(cursor) => {
                let end = self.messages.partition_point(|m| m.created_at < cursor);
                &self.messages[..end]
            }
            None => &self.messages,
        };
        let start = window.len().saturating_sub(limit);
        &window[start..]
    }
}
