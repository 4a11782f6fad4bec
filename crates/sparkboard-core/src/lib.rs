//! # Sparkboard Core Library
//!
//! Logic behind the Sparkboard personal dashboard. The `sparkboard` CLI is a
//! thin front-end over this crate; nothing here renders anything.
//!
//! ## Architecture
//!
//! - **Gate**: decides when the daily gratitude prompt is due. Wall-clock
//!   driven; the caller invokes `tick()` and no internal thread exists
//! - **Records**: write-through stores for budget, goals, checklist, prayers
//!   and chat transcripts, all behind the [`KvStore`] persistence port
//! - **Advisors**: outfit rules over a forecast, the canned money coach and
//!   the AI buddy chat
//! - **Storage**: SQLite key/value table and TOML configuration
//!
//! ## Key Components
//!
//! - [`GateController`]: gratitude prompt state and re-show timer
//! - [`RecordStore`]: persisted value with write-through mutation
//! - [`Database`]: SQLite-backed [`KvStore`]
//! - [`Config`]: application configuration management

pub mod advisor;
pub mod assistant;
pub mod coach;
pub mod error;
pub mod events;
pub mod gate;
pub mod records;
pub mod storage;

pub use advisor::{Activity, AdviceReport, Forecast, ForecastClient, OutfitAdvisor};
pub use assistant::{AssistantSession, ChatBackend, ChatClient};
pub use coach::{CoachSession, Snapshot};
pub use error::{ConfigError, CoreError, LocationError, StorageError, UpstreamError, ValidationError};
pub use events::Event;
pub use gate::{GateController, GateState, GratitudeEntry};
pub use records::{
    BucketKind, BudgetBook, ChatMessage, CreditChecklist, GoalBoard, PrayerWall, RecordStore,
    Transcript,
};
pub use storage::{Config, Database, KvStore, MemoryKv};
