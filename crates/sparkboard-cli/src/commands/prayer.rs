use clap::Subcommand;
use sparkboard_core::records::PrayerEntry;
use sparkboard_core::{Database, PrayerWall};

use super::{print_json, today, CmdResult};

#[derive(Subcommand)]
pub enum PrayerAction {
    /// Show the prayer wall
    List {
        /// Include answered prayers
        #[arg(long)]
        all: bool,
    },
    /// Post a prayer request
    Add { text: String },
    /// Count one more prayer for a request
    Pray { id: String },
    /// Mark a request answered (or back to open)
    Answered { id: String },
    /// Remove a request
    Delete { id: String },
}

pub fn run(action: PrayerAction, json: bool) -> CmdResult {
    let db = Database::open()?;
    let mut wall = PrayerWall::open(&db);
    let missing = |id: &str| format!("no prayer with id {id}");

    match action {
        PrayerAction::List { all } => {
            let shown: Vec<&PrayerEntry> = if all {
                wall.all().iter().collect()
            } else {
                wall.unanswered().collect()
            };
            if json {
                return print_json(&shown);
            }
            if shown.is_empty() {
                println!("No prayer requests.");
            }
            for p in shown {
                print_prayer(p);
            }
        }
        PrayerAction::Add { text } => {
            let entry = wall.add(&text, today())?;
            if json {
                return print_json(&entry);
            }
            print_prayer(&entry);
        }
        PrayerAction::Pray { id } => {
            let count = wall.pray_for(&id)?.ok_or_else(|| missing(&id))?;
            if json {
                return print_json(&serde_json::json!({ "id": id, "prayedCount": count }));
            }
            println!("🙏 Prayed {count} time(s).");
        }
        PrayerAction::Answered { id } => {
            let answered = wall.toggle_answered(&id)?.ok_or_else(|| missing(&id))?;
            if json {
                return print_json(&serde_json::json!({ "id": id, "answered": answered }));
            }
            println!("{}", if answered { "Answered! 🎉" } else { "Moved back to open requests." });
        }
        PrayerAction::Delete { id } => {
            let removed = wall.delete(&id)?;
            if json {
                return print_json(&serde_json::json!({ "removed": removed }));
            }
            println!("{}", if removed { "Removed." } else { "Nothing to remove." });
        }
    }
    Ok(())
}

fn print_prayer(p: &PrayerEntry) {
    let mark = if p.answered { " ✅" } else { "" };
    println!("{}  {}  {}  🙏 {}{mark}", p.id, p.date, p.text, p.prayed_count);
}
