use crate::service::ChatService;
use mentor_core::SessionStore;
use mentor_llm::CompletionProvider;
use std::sync::Arc;

/// Shared application state: the orchestrator over its constructed
/// dependencies. Built once at startup and cloned into workers.
pub struct AppState {
    pub chat: ChatService,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, completions: Arc<dyn CompletionProvider>) -> Self {
        Self {
            chat: ChatService::new(store, completions),
        }
    }
}
