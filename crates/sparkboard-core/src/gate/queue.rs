//! Single-threaded queue of named, cancellable timers.
//!
//! Like the rest of the crate this has no internal thread: the caller feeds
//! it the wall clock through [`TaskQueue::poll`]. A name identifies at most
//! one pending timer; scheduling a name again replaces the earlier timer.

use std::collections::BTreeMap;

/// Handle returned by [`TaskQueue::schedule`]. Cancelling a stale handle
/// (one already fired, cancelled or replaced) is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    name: String,
}

impl TimerHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer {
    pub name: String,
    pub due_at: i64,
}

#[derive(Debug, Clone)]
struct Pending {
    name: String,
    due_at: i64,
}

#[derive(Debug, Default)]
pub struct TaskQueue {
    next_id: u64,
    pending: BTreeMap<u64, Pending>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `name` to fire at `due_at`, cancelling any pending timer
    /// with the same name.
    pub fn schedule(&mut self, name: &str, due_at: i64) -> TimerHandle {
        self.cancel_named(name);
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(
            id,
            Pending {
                name: name.to_string(),
                due_at,
            },
        );
        TimerHandle {
            id,
            name: name.to_string(),
        }
    }

    /// Returns whether the timer was still pending.
    pub fn cancel(&mut self, handle: &TimerHandle) -> bool {
        self.pending.remove(&handle.id).is_some()
    }

    pub fn cancel_named(&mut self, name: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|_, p| p.name != name);
        before != self.pending.len()
    }

    pub fn is_pending(&self, handle: &TimerHandle) -> bool {
        self.pending.contains_key(&handle.id)
    }

    pub fn due_at(&self, name: &str) -> Option<i64> {
        self.pending
            .values()
            .find(|p| p.name == name)
            .map(|p| p.due_at)
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<i64> {
        self.pending.values().map(|p| p.due_at).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn poll(&mut self, now: i64) -> Vec<FiredTimer> {
        let due: Vec<u64> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_at <= now)
            .map(|(id, _)| *id)
            .collect();

        let mut fired: Vec<(u64, Pending)> = due
            .into_iter()
            .filter_map(|id| self.pending.remove(&id).map(|p| (id, p)))
            .collect();
        fired.sort_by_key(|(id, p)| (p.due_at, *id));

        fired
            .into_iter()
            .map(|(_, p)| FiredTimer {
                name: p.name,
                due_at: p.due_at,
            })
            .collect()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
