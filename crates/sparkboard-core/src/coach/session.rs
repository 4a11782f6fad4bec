use std::time::Duration;

use rand::Rng;

use super::insights::Snapshot;
use super::responder::{respond, ATTITUDE};
use crate::error::{CoreError, ValidationError};
use crate::records::{ChatMessage, RecordStore, Transcript};
use crate::storage::keys;
use crate::storage::kv::KvStore;

pub const EMPTY_MESSAGE: &str = "Type a message for the coach first.";

/// Persisted coach chat.
pub struct CoachSession<S> {
    transcript: RecordStore<S, Transcript>,
    reply_delay: Duration,
}

impl<S: KvStore> CoachSession<S> {
    pub fn open(store: S, reply_delay: Duration) -> Self {
        Self {
            transcript: RecordStore::load(store, keys::COACH_CHAT, greeting(0)),
            reply_delay,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        self.transcript.value()
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Append the user's message, wait the reply delay, append the reply.
    ///
    /// The user message is stored before the pause so it survives an
    /// interrupted reply.
    pub async fn send<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Result<ChatMessage, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty("message", EMPTY_MESSAGE).into());
        }
        self.transcript.mutate(|t| t.push(ChatMessage::user(text)))?;

        let reply = ChatMessage::coach(respond(text, snapshot, rng));
        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }
        self.transcript.mutate(|t| t.push(reply.clone()))?;
        tracing::debug!(len = self.transcript.value().len(), "coach replied");
        Ok(reply)
    }

    /// Start over with the "cleared" greeting.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.transcript.replace(greeting(1))?;
        Ok(())
    }
}

fn greeting(line: usize) -> Transcript {
    Transcript::starting_with(ChatMessage::coach(ATTITUDE[line]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ChatRole;
    use crate::storage::MemoryKv;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_chat_opens_with_greeting() {
        let kv = MemoryKv::new();
        let session = CoachSession::open(&kv, Duration::ZERO);
        assert_eq!(
            session.transcript().messages(),
            &[ChatMessage::coach(ATTITUDE[0])]
        );
    }

    #[tokio::test]
    async fn send_appends_user_then_coach() {
        let kv = MemoryKv::new();
        let mut session = CoachSession::open(&kv, Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(1);
        let reply = session
            .send("  roast me ", &Snapshot::default(), &mut rng)
            .await
            .unwrap();
        assert!(reply.content.starts_with("You asked for honesty"));

        let msgs = session.transcript().messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1], ChatMessage::user("roast me"));
        assert_eq!(msgs[2].role, ChatRole::Coach);

        // Persisted.
        let reopened = CoachSession::open(&kv, Duration::ZERO);
        assert_eq!(reopened.transcript().len(), 3);
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let kv = MemoryKv::new();
        let mut session = CoachSession::open(&kv, Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(1);
        let err = session
            .send("   ", &Snapshot::default(), &mut rng)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(kv.is_empty());
    }

    #[test]
    fn clear_uses_second_greeting() {
        let kv = MemoryKv::new();
        let mut session = CoachSession::open(&kv, Duration::ZERO);
        session.clear().unwrap();
        assert_eq!(
            session.transcript().messages(),
            &[ChatMessage::coach(ATTITUDE[1])]
        );
    }
}
