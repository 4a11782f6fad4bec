use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State changes surfaced to the front-end.
/// The CLI prints them as JSON; a GUI would poll for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The gratitude prompt must be shown now.
    GratitudePromptDue { at: DateTime<Utc> },
    /// The automatic re-show timer was (re)armed.
    ReshowScheduled {
        due_at: DateTime<Utc>,
        delay_ms: u64,
    },
    /// The re-show timer was cancelled (teardown or replaced).
    ReshowCancelled { at: DateTime<Utc> },
}

/// Epoch milliseconds to a UTC timestamp; out-of-range values clamp to the epoch.
pub fn timestamp(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}
