//! "Money Buddy": canned, keyword-matched replies about the budget.

pub mod format;
pub mod insights;
pub mod responder;
mod session;

pub use format::currency;
pub use insights::{compute_insights, BudgetItem, Snapshot};
pub use responder::{remaining_tip, respond, Intent, ATTITUDE};
pub use session::{CoachSession, EMPTY_MESSAGE};
