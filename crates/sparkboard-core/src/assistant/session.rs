//! Persisted conversation with the AI buddy.
//!
//! A send is split in two halves so the in-flight state is explicit:
//! [`AssistantSession::begin`] stores the user's message and returns the
//! request payload, [`AssistantSession::finish`] stores whatever came back.
//! While a send is pending a second `begin` is refused.

use indoc::indoc;

use super::backend::ChatBackend;
use crate::error::{CoreError, UpstreamError, ValidationError};
use crate::records::{ChatMessage, RecordStore, Transcript};
use crate::storage::keys;
use crate::storage::kv::KvStore;

pub const SYSTEM_PROMPT: &str = indoc! {"
    You are Myka’s AI Buddy. Speak warmly and simply. Tone: kind, encouraging, and grounded in Christian faith when relevant.\x20
    Myka likes Harry Potter, Legos, and Christian music—feel free to use gentle, magical metaphors and playful references.
    Be practical and supportive. If advice involves health, suggest talking to a trusted adult or professional. Avoid heavy jargon."};

/// Success response without a reply text.
pub const NO_REPLY: &str = "Sorry, I had trouble responding.";
/// Any failed round trip.
pub const HICCUP: &str = "Hmm, I ran into a hiccup. Try again in a moment?";

pub const EMPTY_MESSAGE: &str = "Type a message first.";

pub struct AssistantSession<S, B> {
    transcript: RecordStore<S, Transcript>,
    backend: B,
    pending: bool,
}

impl<S: KvStore, B: ChatBackend> AssistantSession<S, B> {
    /// Load the stored conversation. A fresh one may be seeded with a
    /// context line sent as the first user message.
    pub fn open(store: S, backend: B, seed_context: Option<&str>) -> Self {
        let mut initial = Transcript::with_system(SYSTEM_PROMPT);
        if let Some(ctx) = seed_context.map(str::trim).filter(|c| !c.is_empty()) {
            initial.push(ChatMessage::user(format!("Context: {ctx}")));
        }
        let mut transcript = RecordStore::load(store, keys::ASSISTANT_CHAT, initial);
        if !has_current_system_prompt(transcript.value()) {
            if let Err(e) = transcript.mutate(|t| t.normalize_system(SYSTEM_PROMPT)) {
                tracing::warn!(error = %e, "could not rewrite assistant transcript");
            }
        }
        Self {
            transcript,
            backend,
            pending: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        self.transcript.value()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Store the user's message and mark a request in flight.
    ///
    /// Returns the full conversation to send, system prompt first.
    pub fn begin(&mut self, text: &str) -> Result<Vec<ChatMessage>, CoreError> {
        if self.pending {
            return Err(ValidationError::Busy.into());
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty("message", EMPTY_MESSAGE).into());
        }
        self.transcript.mutate(|t| {
            t.normalize_system(SYSTEM_PROMPT);
            t.push(ChatMessage::user(text));
        })?;
        self.pending = true;
        Ok(self.transcript.value().messages().to_vec())
    }

    /// Store the reply, or the fallback text for a failed round trip.
    pub fn finish(
        &mut self,
        outcome: Result<Option<String>, UpstreamError>,
    ) -> Result<ChatMessage, CoreError> {
        self.pending = false;
        let content = match outcome {
            Ok(Some(text)) => text,
            Ok(None) => NO_REPLY.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                HICCUP.to_string()
            }
        };
        let reply = ChatMessage::assistant(content);
        self.transcript.mutate(|t| t.push(reply.clone()))?;
        Ok(reply)
    }

    /// One full round trip through the backend.
    pub async fn send(&mut self, text: &str) -> Result<ChatMessage, CoreError> {
        let request = self.begin(text)?;
        let outcome = self.backend.complete(&request).await;
        self.finish(outcome)
    }

    /// Back to just the system prompt.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.transcript.replace(Transcript::with_system(SYSTEM_PROMPT))?;
        Ok(())
    }
}

fn has_current_system_prompt(transcript: &Transcript) -> bool {
    let mut system = transcript
        .messages()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.role == crate::records::ChatRole::System);
    matches!(
        (system.next(), system.next()),
        (Some((0, m)), None) if m.content == SYSTEM_PROMPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ChatRole;
    use crate::storage::MemoryKv;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays canned outcomes and records what it was sent.
    struct Scripted {
        outcome: fn() -> Result<Option<String>, UpstreamError>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl Scripted {
        fn new(outcome: fn() -> Result<Option<String>, UpstreamError>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for Scripted {
        async fn complete(
            &self,
            messages: &[ChatMessage],
        ) -> Result<Option<String>, UpstreamError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            (self.outcome)()
        }
    }

    fn ok_reply() -> Result<Option<String>, UpstreamError> {
        Ok(Some("You got this!".into()))
    }

    #[test]
    fn system_prompt_text_is_exact() {
        assert!(SYSTEM_PROMPT.starts_with("You are Myka’s AI Buddy."));
        assert!(SYSTEM_PROMPT.contains("relevant. \nMyka likes"));
        assert!(SYSTEM_PROMPT.ends_with("Avoid heavy jargon."));
    }

    #[tokio::test]
    async fn send_posts_system_first_and_appends_reply() {
        let kv = MemoryKv::new();
        let mut session = AssistantSession::open(&kv, Scripted::new(ok_reply), None);
        let reply = session.send(" hello ").await.unwrap();
        assert_eq!(reply, ChatMessage::assistant("You got this!"));

        let sent = session.backend.seen.lock().unwrap().clone();
        assert_eq!(sent[0][0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(sent[0][1], ChatMessage::user("hello"));

        let visible: Vec<_> = session.transcript().visible().map(|m| m.role).collect();
        assert_eq!(visible, vec![ChatRole::User, ChatRole::Assistant]);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn failures_become_fixed_text() {
        let kv = MemoryKv::new();
        let mut session = AssistantSession::open(
            &kv,
            Scripted::new(|| Err(UpstreamError::Status { service: "chat", status: 500 })),
            None,
        );
        assert_eq!(session.send("hi").await.unwrap().content, HICCUP);

        let kv = MemoryKv::new();
        let mut session = AssistantSession::open(&kv, Scripted::new(|| Ok(None)), None);
        assert_eq!(session.send("hi").await.unwrap().content, NO_REPLY);
    }

    #[test]
    fn second_begin_while_pending_is_refused() {
        let kv = MemoryKv::new();
        let mut session = AssistantSession::open(&kv, Scripted::new(ok_reply), None);
        session.begin("one").unwrap();
        let err = session.begin("two").unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Busy)));
        session.finish(Ok(Some("done".into()))).unwrap();
        assert!(session.begin("three").is_ok());
    }

    #[test]
    fn blank_message_changes_nothing() {
        let kv = MemoryKv::new();
        let mut session = AssistantSession::open(&kv, Scripted::new(ok_reply), None);
        assert!(session.begin("  ").is_err());
        assert!(!session.is_pending());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn stale_system_entry_is_replaced_on_open() {
        let kv = MemoryKv::new();
        kv.set_raw(
            keys::ASSISTANT_CHAT,
            r#"[{"role":"user","content":"hi"},{"role":"system","content":"old"}]"#,
        )
        .unwrap();
        let session = AssistantSession::open(&kv, Scripted::new(ok_reply), None);
        let msgs = session.transcript().messages();
        assert_eq!(msgs[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(msgs.len(), 2);
    }

    #[test]
    fn seed_context_only_applies_to_new_chats() {
        let kv = MemoryKv::new();
        let session = AssistantSession::open(&kv, Scripted::new(ok_reply), Some("exam week"));
        assert_eq!(
            session.transcript().messages()[1],
            ChatMessage::user("Context: exam week")
        );
    }

    #[test]
    fn clear_keeps_only_system_prompt() {
        let kv = MemoryKv::new();
        let mut session = AssistantSession::open(&kv, Scripted::new(ok_reply), None);
        session.begin("hi").unwrap();
        session.finish(Ok(Some("yo".into()))).unwrap();
        session.clear().unwrap();
        assert_eq!(session.transcript(), &Transcript::with_system(SYSTEM_PROMPT));
    }
}
