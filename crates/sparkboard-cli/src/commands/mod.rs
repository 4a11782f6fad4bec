pub mod auth;
pub mod budget;
pub mod buddy;
pub mod checklist;
pub mod coach;
pub mod config;
pub mod goal;
pub mod gratitude;
pub mod outfit;
pub mod prayer;

use serde::Serialize;
use sparkboard_core::records::{ChatMessage, ChatRole};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Wall clock in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn print_chat<'a>(messages: impl Iterator<Item = &'a ChatMessage>) {
    for m in messages {
        let who = match m.role {
            ChatRole::User => "you",
            ChatRole::Assistant => "buddy",
            ChatRole::Coach => "coach",
            ChatRole::System => continue,
        };
        println!("{who}: {}", m.content);
    }
}
