//! Chat transcripts shared by the assistant and the coach.
//!
//! A transcript may start with one `system` instruction. It is sent upstream
//! but never rendered. Everything after it is in send order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Coach,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    pub fn coach(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Coach, content)
    }
}

/// Ordered message list, persisted as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<ChatMessage>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(prompt: &str) -> Self {
        Self(vec![ChatMessage::system(prompt)])
    }

    pub fn starting_with(message: ChatMessage) -> Self {
        Self(vec![message])
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.0.push(message);
    }

    /// Messages meant for display (everything but `system`).
    pub fn visible(&self) -> impl Iterator<Item = &ChatMessage> {
        self.0.iter().filter(|m| m.role != ChatRole::System)
    }

    /// Drop every system entry and put `prompt` first.
    ///
    /// Older or hand-edited transcripts may carry a stale or duplicated
    /// instruction; after this there is exactly one, and it is current.
    pub fn normalize_system(&mut self, prompt: &str) {
        self.0.retain(|m| m.role != ChatRole::System);
        self.0.insert(0, ChatMessage::system(prompt));
    }
}
