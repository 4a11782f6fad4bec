//! Daily gratitude prompt.
//!
//! [`policy`] holds the pure 24-hour window arithmetic, [`queue`] the
//! cancellable timer queue, and [`GateController`] ties both to storage.

mod controller;
pub mod policy;
pub mod queue;

pub use controller::{GateController, GratitudeEntry, EMPTY_ANSWER_MESSAGE, RESHOW_TIMER};
pub use policy::{GateState, WINDOW_MS};
pub use queue::{FiredTimer, TaskQueue, TimerHandle};
