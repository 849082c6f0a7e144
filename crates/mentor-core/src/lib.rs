//! # mentor-core
//!
//! Domain types and policies for the mentor chat study: questionnaire-derived
//! personalities, control/treatment arm assignment, and the session store
//! with ordered, paginated message history.

pub mod balancer;
pub mod chat;
pub mod error;
pub mod personality;
pub mod store;

pub use balancer::{decide, Assignment, TARGET_CONTROL_RATIO};
pub use chat::{ChatSession, Message, Role, Sender, Turn};
pub use error::StoreError;
pub use personality::{compose, Personality, TraitPole, NEUTRAL_PERSONALITY, QUESTION_COUNT};
pub use store::{JsonFileStore, MemoryStore, SessionCounts, SessionStore};
