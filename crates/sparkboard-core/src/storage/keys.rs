//! Persisted key names.
//!
//! These names are part of the on-disk format; renaming one orphans the
//! user's existing data.

/// Epoch-ms of the last answered gratitude prompt.
pub const LAST_PROMPT_AT: &str = "myka_last_prompt_at";
/// Most recent gratitude text.
pub const CURRENT_GRATITUDE: &str = "myka_gratitude";
/// Capped gratitude history, most recent first.
pub const GRATITUDE_HISTORY: &str = "myka_gratitude_history";
pub const BUDGET_BUCKETS: &str = "myka_buckets";
pub const DAILY_INCOME: &str = "myka_daily_income";
pub const SAVINGS_GOALS: &str = "myka_savings_goals";
pub const CREDIT_CHECKLIST: &str = "myka_credit_checklist";
pub const PRAYERS: &str = "myka_prayers";
/// Assistant transcript, system entry first.
pub const ASSISTANT_CHAT: &str = "myka_chat_messages";
/// Coach transcript.
pub const COACH_CHAT: &str = "myka_cleo_chat";

/// Every key the dashboard owns, for diagnostics and resets.
pub const ALL: &[&str] = &[
    LAST_PROMPT_AT,
    CURRENT_GRATITUDE,
    GRATITUDE_HISTORY,
    BUDGET_BUCKETS,
    DAILY_INCOME,
    SAVINGS_GOALS,
    CREDIT_CHECKLIST,
    PRAYERS,
    ASSISTANT_CHAT,
    COACH_CHAT,
];
