use clap::Subcommand;
use serde_json::json;
use sparkboard_core::{CreditChecklist, Database};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ChecklistAction {
    /// Show the credit builder checklist
    Show,
    /// Mark an item done, or not done
    Toggle { id: u32 },
}

pub fn run(action: ChecklistAction, json: bool) -> CmdResult {
    let db = Database::open()?;
    let mut checklist = CreditChecklist::open(&db);

    if let ChecklistAction::Toggle { id } = action {
        checklist
            .toggle(id)?
            .ok_or_else(|| format!("no checklist item {id}"))?;
    }

    if json {
        return print_json(&json!({
            "items": checklist.items(),
            "stars": checklist.stars(),
            "complete": checklist.all_complete(),
        }));
    }
    for item in checklist.items() {
        let mark = if item.completed { "x" } else { " " };
        println!("[{mark}] {}. {}", item.id, item.task);
    }
    println!("{}", "⭐".repeat(checklist.stars()));
    if checklist.all_complete() {
        println!("🎉 Credit builder complete!");
    }
    Ok(())
}
