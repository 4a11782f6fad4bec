use std::time::Duration;

use clap::Subcommand;
use sparkboard_core::coach::compute_insights;
use sparkboard_core::{BudgetBook, CoachSession, Config, Database, GoalBoard, Snapshot};

use super::{print_chat, print_json, CmdResult};

#[derive(Subcommand)]
pub enum CoachAction {
    /// Say something to Money Buddy
    Say { text: String },
    /// Show the conversation and budget insights
    Show,
    /// Start the conversation over
    Clear,
}

pub async fn run(action: CoachAction, json: bool) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let delay = Duration::from_millis(config.coach.reply_delay_ms);
    let mut session = CoachSession::open(&db, delay);

    match action {
        CoachAction::Say { text } => {
            let snapshot = Snapshot::from_stores(&BudgetBook::open(&db), &GoalBoard::open(&db));
            let reply = session
                .send(&text, &snapshot, &mut rand::thread_rng())
                .await?;
            if json {
                return print_json(&reply);
            }
            println!("coach: {}", reply.content);
        }
        CoachAction::Show => {
            let snapshot = Snapshot::from_stores(&BudgetBook::open(&db), &GoalBoard::open(&db));
            let insights = compute_insights(&snapshot);
            if json {
                return print_json(&serde_json::json!({
                    "insights": insights,
                    "messages": session.transcript(),
                }));
            }
            for line in &insights {
                println!("💡 {line}");
            }
            println!();
            print_chat(session.transcript().visible());
        }
        CoachAction::Clear => {
            session.clear()?;
            if !json {
                print_chat(session.transcript().visible());
            }
        }
    }
    Ok(())
}
