use clap::Subcommand;
use sparkboard_core::{AssistantSession, ChatClient, Config, Database};

use super::{print_chat, print_json, CmdResult};

#[derive(Subcommand)]
pub enum BuddyAction {
    /// Send a message to AI Buddy
    Say {
        text: String,
        /// Background shared once when a new conversation starts
        #[arg(long)]
        context: Option<String>,
    },
    /// Show the conversation
    Show,
    /// Forget the conversation
    Clear,
}

pub async fn run(action: BuddyAction, json: bool) -> CmdResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let client = ChatClient::from_config(&config.chat)?;
    tracing::debug!(endpoint = %client.endpoint(), "chat proxy");

    match action {
        BuddyAction::Say { text, context } => {
            let mut session = AssistantSession::open(&db, client, context.as_deref());
            let reply = session.send(&text).await?;
            if json {
                return print_json(&reply);
            }
            println!("buddy: {}", reply.content);
        }
        BuddyAction::Show => {
            let session = AssistantSession::open(&db, client, None);
            if json {
                return print_json(session.transcript());
            }
            print_chat(session.transcript().visible());
        }
        BuddyAction::Clear => {
            let mut session = AssistantSession::open(&db, client, None);
            session.clear()?;
            if !json {
                println!("Conversation cleared.");
            }
        }
    }
    Ok(())
}
