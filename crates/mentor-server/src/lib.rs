//! # mentor-server
//!
//! HTTP surface for the mentor chat study: session creation from
//! questionnaire answers, message exchange, and paginated history.

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod service;
pub mod state;

pub use error::ChatError;
pub use server::{routes, run_server};
pub use service::{ChatService, CONTEXT_WINDOW};
pub use state::AppState;
