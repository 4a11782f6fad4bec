//! Gratitude gate controller.
//!
//! Owns the persisted gate state, the current gratitude text, the capped
//! history and the single re-show timer.
//!
//! ## Lifecycle
//!
//! ```text
//! open -> arm(now) -> tick(now)* -> record_answer(text, now) -> tick(now)* -> teardown(now)
//! ```
//!
//! `arm` reports a due prompt immediately or schedules the re-show timer.
//! `tick` fires the timer once its deadline passes. At most one re-show timer
//! is pending; answering, re-arming and teardown all cancel the previous one.

use serde::{Deserialize, Serialize};

use super::policy::{self, GateState};
use super::queue::{TaskQueue, TimerHandle};
use crate::error::{CoreError, ValidationError};
use crate::events::{timestamp, Event};
use crate::records::RecordStore;
use crate::storage::keys;
use crate::storage::kv::KvStore;

/// Name of the re-show timer in the task queue.
pub const RESHOW_TIMER: &str = "gratitude.reshow";

pub const EMPTY_ANSWER_MESSAGE: &str = "Please enter something you're thankful for!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub text: String,
    pub timestamp: i64,
}

pub struct GateController<S> {
    state: RecordStore<S, GateState>,
    current: RecordStore<S, Option<String>>,
    history: RecordStore<S, Vec<GratitudeEntry>>,
    history_cap: usize,
    queue: TaskQueue,
    reshow: Option<TimerHandle>,
}

impl<S: KvStore + Clone> GateController<S> {
    pub fn open(store: S, history_cap: usize) -> Self {
        Self {
            state: RecordStore::load(store.clone(), keys::LAST_PROMPT_AT, GateState::default()),
            current: RecordStore::load(store.clone(), keys::CURRENT_GRATITUDE, None),
            history: RecordStore::load(store, keys::GRATITUDE_HISTORY, Vec::new()),
            history_cap: history_cap.max(1),
            queue: TaskQueue::new(),
            reshow: None,
        }
    }

    pub fn state(&self) -> GateState {
        *self.state.value()
    }

    pub fn should_prompt(&self, now: i64) -> bool {
        policy::should_prompt_now(self.state.value(), now)
    }

    /// Most recent answer, for the dashboard header.
    pub fn current(&self) -> Option<&str> {
        self.current.value().as_deref()
    }

    /// Answers, most recent first.
    pub fn history(&self) -> &[GratitudeEntry] {
        self.history.value()
    }

    /// The newest `limit` answers.
    pub fn recent(&self, limit: usize) -> &[GratitudeEntry] {
        let all = self.history.value();
        &all[..limit.min(all.len())]
    }

    /// Deadline of the pending re-show timer, if armed.
    pub fn next_reshow_at(&self) -> Option<i64> {
        self.reshow
            .as_ref()
            .filter(|h| self.queue.is_pending(h))
            .and_then(|_| self.queue.due_at(RESHOW_TIMER))
    }

    pub fn is_armed(&self) -> bool {
        self.next_reshow_at().is_some()
    }

    /// Re-read persisted state, picking up answers written elsewhere.
    pub fn refresh(&mut self) {
        self.state.reload();
        self.current.reload();
        self.history.reload();
    }

    /// Decide what to do at startup: prompt now, or arm the re-show timer.
    pub fn arm(&mut self, now: i64) -> Event {
        if self.should_prompt(now) {
            self.cancel_reshow();
            tracing::info!("gratitude prompt due");
            return Event::GratitudePromptDue { at: timestamp(now) };
        }
        self.schedule_reshow(now)
    }

    /// Advance the timer queue. Returns a prompt event when the re-show
    /// timer fires and the prompt is still due.
    pub fn tick(&mut self, now: i64) -> Vec<Event> {
        let mut events = Vec::new();
        for fired in self.queue.poll(now) {
            if fired.name != RESHOW_TIMER {
                continue;
            }
            self.reshow = None;
            // Another writer may have answered meanwhile.
            self.state.reload();
            events.push(self.arm(now));
        }
        events
    }

    /// Store an answer, restart the window and re-arm the timer.
    ///
    /// # Errors
    /// Rejects blank text without touching any state; storage failures are
    /// propagated.
    pub fn record_answer(&mut self, text: &str, now: i64) -> Result<GratitudeEntry, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty("gratitude", EMPTY_ANSWER_MESSAGE).into());
        }
        let entry = GratitudeEntry {
            text: text.to_string(),
            timestamp: now,
        };

        let cap = self.history_cap;
        let stored = entry.clone();
        self.history.mutate(|history| {
            history.insert(0, stored);
            history.truncate(cap);
        })?;
        self.current.replace(Some(entry.text.clone()))?;
        // Written last: if anything above failed the user is simply asked again.
        self.state.replace(policy::record_answer(now))?;

        tracing::info!(chars = entry.text.len(), "gratitude recorded");
        self.schedule_reshow(now);
        Ok(entry)
    }

    /// Cancel the pending timer. Safe to call repeatedly.
    pub fn teardown(&mut self, now: i64) -> Option<Event> {
        self.cancel_reshow()
            .then(|| Event::ReshowCancelled { at: timestamp(now) })
    }

    fn schedule_reshow(&mut self, now: i64) -> Event {
        let delay = policy::schedule_next_prompt(self.state.value(), now);
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let due_at = now.saturating_add(delay_ms as i64);
        // schedule() replaces any pending timer with this name.
        self.reshow = Some(self.queue.schedule(RESHOW_TIMER, due_at));
        tracing::debug!(delay_ms, "gratitude re-show armed");
        Event::ReshowScheduled {
            due_at: timestamp(due_at),
            delay_ms,
        }
    }

    fn cancel_reshow(&mut self) -> bool {
        match self.reshow.take() {
            Some(handle) => self.queue.cancel(&handle),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::policy::WINDOW_MS;
    use crate::storage::MemoryKv;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn fresh_install_prompts_without_timer() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 30);
        assert!(matches!(gate.arm(NOW), Event::GratitudePromptDue { .. }));
        assert!(!gate.is_armed());
    }

    #[test]
    fn blank_answer_mutates_nothing() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 30);
        let err = gate.record_answer("   ", NOW).unwrap_err();
        assert_eq!(err.to_string(), format!("Validation error: {EMPTY_ANSWER_MESSAGE}"));
        assert!(kv.is_empty());
        assert!(gate.should_prompt(NOW));
    }

    #[test]
    fn answer_closes_gate_and_arms_timer() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 30);
        let entry = gate.record_answer("  sunshine ", NOW).unwrap();
        assert_eq!(entry.text, "sunshine");
        assert!(!gate.should_prompt(NOW));
        assert!(gate.should_prompt(NOW + WINDOW_MS));
        assert_eq!(gate.next_reshow_at(), Some(NOW + WINDOW_MS));
        assert_eq!(gate.current(), Some("sunshine"));
    }

    #[test]
    fn timer_fires_once_window_elapses() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 30);
        gate.record_answer("tea", NOW).unwrap();
        assert!(gate.tick(NOW + WINDOW_MS - 1).is_empty());
        let events = gate.tick(NOW + WINDOW_MS);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::GratitudePromptDue { .. }));
        assert!(gate.tick(NOW + 2 * WINDOW_MS).is_empty());
    }

    #[test]
    fn second_answer_replaces_pending_timer() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 30);
        gate.record_answer("one", NOW).unwrap();
        gate.record_answer("two", NOW + 1_000).unwrap();
        assert_eq!(gate.next_reshow_at(), Some(NOW + 1_000 + WINDOW_MS));
        // The first deadline passes without a duplicate prompt.
        assert!(gate.tick(NOW + WINDOW_MS).is_empty());
        assert_eq!(gate.tick(NOW + 1_000 + WINDOW_MS).len(), 1);
    }

    #[test]
    fn external_answer_rearms_instead_of_prompting() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 30);
        gate.record_answer("first", NOW).unwrap();

        // Another process answers later.
        let later = NOW + WINDOW_MS - 10;
        kv.set_raw(keys::LAST_PROMPT_AT, &later.to_string()).unwrap();

        let events = gate.tick(NOW + WINDOW_MS);
        assert!(matches!(events[0], Event::ReshowScheduled { .. }));
        assert_eq!(gate.next_reshow_at(), Some(later + WINDOW_MS));
    }

    #[test]
    fn teardown_cancels_timer() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 30);
        gate.record_answer("rain", NOW).unwrap();
        assert_eq!(
            gate.teardown(NOW + 5),
            Some(Event::ReshowCancelled { at: timestamp(NOW + 5) })
        );
        assert!(gate.teardown(NOW + 6).is_none());
        assert!(gate.tick(NOW + WINDOW_MS).is_empty());
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let kv = MemoryKv::new();
        let mut gate = GateController::open(&kv, 3);
        for (i, text) in ["a", "b", "c", "d"].iter().enumerate() {
            gate.record_answer(text, NOW + i as i64).unwrap();
        }
        let texts: Vec<_> = gate.history().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["d", "c", "b"]);
        assert_eq!(gate.recent(1)[0].text, "d");
        assert_eq!(gate.recent(10).len(), 3);
    }

    #[test]
    fn malformed_state_reads_as_never_answered() {
        let kv = MemoryKv::new();
        kv.set_raw(keys::LAST_PROMPT_AT, "\"yesterday\"").unwrap();
        kv.set_raw(keys::GRATITUDE_HISTORY, "[{").unwrap();
        let gate = GateController::open(&kv, 30);
        assert!(gate.should_prompt(NOW));
        assert!(gate.history().is_empty());
    }
}
