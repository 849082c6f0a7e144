//! Chat orchestration: session creation with arm assignment, message
//! exchange against the completion provider, and history reads.

use crate::error::{ChatError, Result};
use mentor_core::{balancer, personality, ChatSession, Message, Sender, SessionStore, Turn};
use mentor_llm::CompletionProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// How many of the most recent messages are sent as conversational context
/// with each completion call.
pub const CONTEXT_WINDOW: usize = 20;

#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn SessionStore>,
    completions: Arc<dyn CompletionProvider>,
    /// Serializes count-read, arm decision and insert so concurrent creates
    /// cannot both act on a stale ratio. Sessions only contend here, at
    /// creation time.
    create_lock: Arc<Mutex<()>>,
}

impl ChatService {
    pub fn new(store: Arc<dyn SessionStore>, completions: Arc<dyn CompletionProvider>) -> Self {
        Self {
            store,
            completions,
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create a session for `private_id`: compose the questionnaire-derived
    /// personality, assign the experimental arm from a fresh session count,
    /// and persist. Fails with [`ChatError::AlreadyExists`] if the id is
    /// taken; the existing session is left untouched.
    pub async fn create_session(
        &self,
        private_id: &str,
        answers: &HashMap<String, String>,
    ) -> Result<()> {
        if private_id.trim().is_empty() {
            return Err(ChatError::Validation("privateID is required".into()));
        }

        let composed = personality::compose(answers);

        let _guard = self.create_lock.lock().await;
        let counts = self.store.counts().await?;
        let assignment = balancer::decide(counts.total, counts.control);

        // Control keeps the questionnaire's trait labels; only the prompt
        // text is replaced.
        let text = assignment
            .personality_override
            .map(str::to_string)
            .unwrap_or(composed.text);
        let session = ChatSession::new(private_id, text, composed.traits, assignment.is_control);

        self.store.create(session).await?;
        log::info!(
            "created session (control: {}, sessions so far: {})",
            assignment.is_control,
            counts.total + 1
        );
        Ok(())
    }

    /// Append the user's message, ask the completion provider for a reply
    /// with the recent history as context, and append the reply.
    ///
    /// The user message is persisted before the completion call; an upstream
    /// failure returns an error without appending an assistant message, so
    /// user input is never lost.
    pub async fn send_message(&self, private_id: &str, text: &str) -> Result<Message> {
        if private_id.trim().is_empty() {
            return Err(ChatError::Validation("privateID is required".into()));
        }
        if text.trim().is_empty() {
            return Err(ChatError::Validation("userMessage is required".into()));
        }

        let session = self
            .store
            .find(private_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let user_message = self
            .store
            .append_message(private_id, text.to_string(), Sender::User, None)
            .await?;

        // The window includes the just-appended user message as its newest
        // turn.
        let history = self
            .store
            .recent_history(private_id, CONTEXT_WINDOW, None)
            .await?;
        let turns: Vec<Turn> = history.iter().map(Message::to_turn).collect();

        let reply = self
            .completions
            .complete(&session.personality, &turns)
            .await
            .map_err(|e| {
                log::warn!("completion failed, keeping user message: {}", e);
                ChatError::from(e)
            })?;

        let assistant_message = self
            .store
            .append_message(private_id, reply, Sender::Assistant, Some(user_message.id))
            .await?;
        Ok(assistant_message)
    }

    /// Role-tagged history plus whether a personality is assigned.
    pub async fn history(
        &self,
        private_id: &str,
        limit: usize,
        before: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(Vec<Message>, bool)> {
        if private_id.trim().is_empty() {
            return Err(ChatError::Validation("privateID is required".into()));
        }

        let session = self
            .store
            .find(private_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;
        let messages = self.store.recent_history(private_id, limit, before).await?;
        Ok((messages, !session.personality.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mentor_core::{MemoryStore, NEUTRAL_PERSONALITY};
    use mentor_llm::CompletionError;
    use std::sync::Mutex as StdMutex;

    /// Records what the orchestrator sent and answers with a canned reply.
    struct StubProvider {
        fail: bool,
        seen: StdMutex<Option<(String, Vec<Turn>)>>,
    }

    impl StubProvider {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: StdMutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(
            &self,
            system_prompt: &str,
            turns: &[Turn],
        ) -> std::result::Result<String, CompletionError> {
            *self.seen.lock().unwrap() = Some((system_prompt.to_string(), turns.to_vec()));
            if self.fail {
                Err(CompletionError::Api("upstream unavailable".into()))
            } else {
                Ok("the assistant reply".to_string())
            }
        }
    }

    fn answers() -> HashMap<String, String> {
        (1..=5).map(|i| (i.to_string(), "7".to_string())).collect()
    }

    fn service_with(provider: Arc<StubProvider>) -> ChatService {
        ChatService::new(Arc::new(MemoryStore::new()), provider)
    }

    #[tokio::test]
    async fn first_session_is_control_second_is_treatment() {
        let provider = Arc::new(StubProvider::new(false));
        let store = Arc::new(MemoryStore::new());
        let service = ChatService::new(store.clone(), provider);

        service.create_session("first", &answers()).await.unwrap();
        service.create_session("second", &answers()).await.unwrap();

        let first = store.find("first").await.unwrap().unwrap();
        assert!(first.is_control);
        assert_eq!(first.personality, NEUTRAL_PERSONALITY);
        // Trait labels are recorded even for control sessions.
        assert_eq!(first.traits.len(), 5);

        let second = store.find("second").await.unwrap().unwrap();
        assert!(!second.is_control);
        assert_ne!(second.personality, NEUTRAL_PERSONALITY);
        assert!(second.personality.contains("highly confident"));
    }

    #[tokio::test]
    async fn create_with_empty_private_id_is_rejected_before_storage() {
        let store = Arc::new(MemoryStore::new());
        let service = ChatService::new(store.clone(), Arc::new(StubProvider::new(false)));

        let err = service.create_session("  ", &answers()).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(store.counts().await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn duplicate_create_fails_and_preserves_the_first_assignment() {
        let store = Arc::new(MemoryStore::new());
        let service = ChatService::new(store.clone(), Arc::new(StubProvider::new(false)));

        service.create_session("pid", &answers()).await.unwrap();
        let original = store.find("pid").await.unwrap().unwrap();

        let err = service.create_session("pid", &answers()).await.unwrap_err();
        assert!(matches!(err, ChatError::AlreadyExists));

        let unchanged = store.find("pid").await.unwrap().unwrap();
        assert_eq!(unchanged.personality, original.personality);
        assert_eq!(unchanged.is_control, original.is_control);
        assert_eq!(store.counts().await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn send_message_to_unknown_session_mutates_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = ChatService::new(store.clone(), Arc::new(StubProvider::new(false)));

        let err = service.send_message("ghost", "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
        assert_eq!(store.counts().await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn send_message_appends_the_user_and_assistant_pair() {
        let provider = Arc::new(StubProvider::new(false));
        let store = Arc::new(MemoryStore::new());
        let service = ChatService::new(store.clone(), provider.clone());
        service.create_session("pid", &answers()).await.unwrap();

        let reply = service.send_message("pid", "hello").await.unwrap();
        assert_eq!(reply.content, "the assistant reply");
        assert_eq!(reply.sender, Sender::Assistant);

        let session = store.find("pid").await.unwrap().unwrap();
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].sender, Sender::User);
        // The reply references the user message it answers.
        assert_eq!(reply.reply_to.as_deref(), Some(session.messages[0].id.as_str()));
    }

    #[tokio::test]
    async fn completion_failure_keeps_the_user_message() {
        let provider = Arc::new(StubProvider::new(true));
        let store = Arc::new(MemoryStore::new());
        let service = ChatService::new(store.clone(), provider);
        service.create_session("pid", &answers()).await.unwrap();

        let err = service.send_message("pid", "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(_)));

        let (messages, _) = service.history("pid", 50, None).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].content, "hello");
    }

    #[tokio::test]
    async fn completion_context_is_the_bounded_tail_ending_with_the_new_message() {
        let provider = Arc::new(StubProvider::new(false));
        let store = Arc::new(MemoryStore::new());
        let service = ChatService::new(store.clone(), provider.clone());
        service.create_session("pid", &answers()).await.unwrap();

        for i in 0..25 {
            store
                .append_message("pid", format!("old {}", i), Sender::User, None)
                .await
                .unwrap();
        }

        service.send_message("pid", "the newest question").await.unwrap();

        let session = store.find("pid").await.unwrap().unwrap();
        let seen = provider.seen.lock().unwrap();
        let (system_prompt, turns) = seen.as_ref().unwrap();
        assert_eq!(system_prompt, &session.personality);
        assert_eq!(turns.len(), CONTEXT_WINDOW);
        assert_eq!(turns.last().unwrap().content, "the newest question");
    }

    #[tokio::test]
    async fn history_of_unknown_session_is_not_found() {
        let service = service_with(Arc::new(StubProvider::new(false)));
        let err = service.history("ghost", 50, None).await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
    }
}
