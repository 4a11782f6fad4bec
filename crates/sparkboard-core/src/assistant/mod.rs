//! AI buddy chat backed by the chat proxy.

pub mod backend;
mod session;

pub use backend::{ChatBackend, ChatClient};
pub use session::{AssistantSession, EMPTY_MESSAGE, HICCUP, NO_REPLY, SYSTEM_PROMPT};
