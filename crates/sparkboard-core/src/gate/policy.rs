//! Cooldown arithmetic for the gratitude prompt.
//!
//! All times are epoch milliseconds. These functions are pure; the
//! [`GateController`](super::GateController) applies them to persisted state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cooldown between prompts: 24 hours.
pub const WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// When the prompt was last answered. Persisted as a bare integer (or null).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateState {
    pub last_prompt_at: Option<i64>,
}

impl GateState {
    pub fn answered_at(now: i64) -> Self {
        Self {
            last_prompt_at: Some(now),
        }
    }
}

/// True when the prompt has never been answered, or the last answer is at
/// least a full window old. A timestamp in the future never prompts.
pub fn should_prompt_now(state: &GateState, now: i64) -> bool {
    match state.last_prompt_at {
        None => true,
        Some(last) => now.saturating_sub(last) >= WINDOW_MS,
    }
}

/// Time until the prompt is due again.
///
/// Zero when it is already due. A `last_prompt_at` in the future is treated
/// as answered just now, so the wait is one full window and never longer.
/// When that timer fires the controller re-arms from the stored state, so a
/// skewed timestamp takes a second wait for the remainder and the prompt is
/// never shown early.
pub fn schedule_next_prompt(state: &GateState, now: i64) -> Duration {
    let wait_ms = match state.last_prompt_at {
        None => 0,
        Some(last) => {
            let elapsed = now.saturating_sub(last);
            if elapsed < 0 {
                WINDOW_MS
            } else {
                WINDOW_MS.saturating_sub(elapsed).max(0)
            }
        }
    };
    Duration::from_millis(wait_ms as u64)
}

/// Answering at `now` restarts the window.
pub fn record_answer(now: i64) -> GateState {
    GateState::answered_at(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn never_answered_prompts() {
        assert!(should_prompt_now(&GateState::default(), NOW));
        assert_eq!(schedule_next_prompt(&GateState::default(), NOW), Duration::ZERO);
    }

    #[test]
    fn just_answered_waits_full_window() {
        let state = record_answer(NOW);
        assert!(!should_prompt_now(&state, NOW));
        assert_eq!(
            schedule_next_prompt(&state, NOW),
            Duration::from_millis(WINDOW_MS as u64)
        );
    }

    #[test]
    fn boundary_is_inclusive() {
        let state = record_answer(NOW);
        assert!(!should_prompt_now(&state, NOW + WINDOW_MS - 1));
        assert!(should_prompt_now(&state, NOW + WINDOW_MS));
        assert_eq!(schedule_next_prompt(&state, NOW + WINDOW_MS), Duration::ZERO);
    }

    #[test]
    fn residual_wait_shrinks() {
        let state = record_answer(NOW);
        let hour = 60 * 60 * 1000;
        assert_eq!(
            schedule_next_prompt(&state, NOW + 20 * hour),
            Duration::from_millis(4 * hour as u64)
        );
    }

    #[test]
    fn long_overdue_is_zero_not_negative() {
        let state = record_answer(NOW);
        assert_eq!(schedule_next_prompt(&state, NOW + 10 * WINDOW_MS), Duration::ZERO);
    }

    #[test]
    fn future_timestamp_does_not_prompt() {
        let state = record_answer(NOW + 5_000);
        assert!(!should_prompt_now(&state, NOW));
        assert_eq!(
            schedule_next_prompt(&state, NOW),
            Duration::from_millis(WINDOW_MS as u64)
        );
    }

    #[test]
    fn persists_as_bare_integer() {
        let json = serde_json::to_string(&record_answer(42)).unwrap();
        assert_eq!(json, "42");
        let none = serde_json::to_string(&GateState::default()).unwrap();
        assert_eq!(none, "null");
    }

    proptest! {
        #[test]
        fn prompt_iff_window_elapsed(last in 0i64..4_000_000_000_000, offset in 0i64..(3 * WINDOW_MS)) {
            let state = record_answer(last);
            prop_assert_eq!(should_prompt_now(&state, last + offset), offset >= WINDOW_MS);
        }

        #[test]
        fn delay_never_exceeds_window(last in 0i64..4_000_000_000_000, now in 0i64..4_000_000_000_000) {
            let d = schedule_next_prompt(&record_answer(last), now);
            prop_assert!(d <= Duration::from_millis(WINDOW_MS as u64));
        }
    }
}
