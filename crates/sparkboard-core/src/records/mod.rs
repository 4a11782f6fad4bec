//! Persisted record collections.
//!
//! Each domain wraps one or more [`RecordStore`]s and exposes the small set
//! of mutations the dashboard needs. Mutations are plain functions over the
//! stored value; the store persists the result.

pub mod budget;
pub mod checklist;
pub mod goals;
pub mod prayers;
pub mod store;
pub mod transcript;

pub use budget::{Bucket, BucketKind, Buckets, BudgetBook, IncomeEntry};
pub use checklist::{ChecklistItem, CreditChecklist};
pub use goals::{GoalBoard, SavingsGoal};
pub use prayers::{PrayerEntry, PrayerWall};
pub use store::RecordStore;
pub use transcript::{ChatMessage, ChatRole, Transcript};

/// Fresh opaque identifier for a new record. Never reused.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Non-finite numbers from user input count as zero.
pub(crate) fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}
