//! Wire types for the `/chat` surface. Field names match what the web client
//! already sends and expects (`privateID`, `userMessage`, `beforeTimestamp`).

use chrono::{DateTime, Utc};
use mentor_core::{Message, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    #[serde(rename = "privateID", default)]
    pub private_id: String,
    /// Questionnaire answers keyed by question index "1" through "5".
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(rename = "privateID", default)]
    pub private_id: String,
    #[serde(rename = "userMessage", default)]
    pub user_message: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "privateID", default)]
    pub private_id: String,
    #[serde(default = "default_history_limit")]
    pub limit: usize,
    /// RFC 3339 cursor for loading older messages.
    #[serde(rename = "beforeTimestamp")]
    pub before_timestamp: Option<DateTime<Utc>>,
}

fn default_history_limit() -> usize {
    50
}

/// A stored message translated to the role-tagged shape the client renders.
/// `createdAt` doubles as the pagination cursor for `beforeTimestamp`.
#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(rename = "replyTo", skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            role: message.sender.into(),
            content: message.content,
            reply_to: message.reply_to,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub status: &'static str,
    pub messages: Vec<MessageDto>,
    #[serde(rename = "personalityAssigned")]
    pub personality_assigned: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateChatResponse {
    pub status: &'static str,
    #[serde(rename = "personalityAssigned")]
    pub personality_assigned: bool,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub status: &'static str,
    pub message: MessageDto,
}
