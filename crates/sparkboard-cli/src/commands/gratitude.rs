use std::time::Duration;

use clap::Subcommand;
use serde_json::json;
use sparkboard_core::events::timestamp;
use sparkboard_core::{Config, Database, Event, GateController};

use super::{now_ms, print_json, CmdResult};

#[derive(Subcommand)]
pub enum GratitudeAction {
    /// Whether the prompt is due, and the last answer
    Status,
    /// Record today's gratitude answer
    Answer {
        /// What you're thankful for
        text: String,
    },
    /// Show recent answers, newest first
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Keep running and report when the prompt comes due
    Watch {
        /// Seconds between checks
        #[arg(long, default_value = "30")]
        poll_secs: u64,
        /// Stop as soon as the prompt is due
        #[arg(long)]
        exit_on_prompt: bool,
    },
}

pub async fn run(action: GratitudeAction, json: bool) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut gate = GateController::open(&db, config.gratitude.history_cap);

    match action {
        GratitudeAction::Status => {
            let now = now_ms();
            let event = gate.arm(now);
            if json {
                print_json(&json!({
                    "due": gate.should_prompt(now),
                    "last_prompt_at": gate.state().last_prompt_at.map(timestamp),
                    "current": gate.current(),
                    "event": event,
                }))?;
            } else {
                report(&event, false)?;
                if let Some(text) = gate.current() {
                    println!("Today's gratitude: {text}");
                }
            }
        }
        GratitudeAction::Answer { text } => {
            let entry = gate.record_answer(&text, now_ms())?;
            if json {
                print_json(&entry)?;
            } else {
                println!("Saved. See you tomorrow!");
            }
        }
        GratitudeAction::History { limit } => {
            let recent = gate.recent(limit);
            if json {
                print_json(recent)?;
            } else if recent.is_empty() {
                println!("No gratitude entries yet.");
            } else {
                for entry in recent {
                    let day = timestamp(entry.timestamp).with_timezone(&chrono::Local);
                    println!("{}  {}", day.format("%b %-d"), entry.text);
                }
            }
        }
        GratitudeAction::Watch {
            poll_secs,
            exit_on_prompt,
        } => {
            let poll = Duration::from_secs(poll_secs.max(1));
            // Only changes are reported; the same deadline or a prompt
            // that is still due prints once.
            let mut last_due: Option<i64> = None;
            let mut prompt_shown = false;
            loop {
                let now = now_ms();
                gate.refresh();
                let mut events = Vec::new();
                if !gate.is_armed() {
                    events.push(gate.arm(now));
                }
                events.extend(gate.tick(now));

                let mut prompted = false;
                for event in events {
                    if let Event::ReshowScheduled { due_at, .. } = &event {
                        let due_ms = due_at.timestamp_millis();
                        if last_due == Some(due_ms) {
                            continue;
                        }
                        last_due = Some(due_ms);
                    }
                    if matches!(event, Event::GratitudePromptDue { .. }) {
                        prompted = true;
                        if prompt_shown {
                            continue;
                        }
                        prompt_shown = true;
                    } else {
                        prompt_shown = false;
                    }
                    report(&event, json)?;
                }
                if prompted && exit_on_prompt {
                    break;
                }
                tokio::time::sleep(poll).await;
            }
            if let Some(event) = gate.teardown(now_ms()) {
                tracing::debug!(?event, "watch stopped");
            }
        }
    }
    Ok(())
}

fn report(event: &Event, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::GratitudePromptDue { .. } => {
            println!("What are you thankful for today? (sparkboard gratitude answer \"...\")")
        }
        Event::ReshowScheduled { due_at, .. } => println!(
            "Next prompt: {}",
            due_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        ),
        Event::ReshowCancelled { .. } => {}
    }
    Ok(())
}
