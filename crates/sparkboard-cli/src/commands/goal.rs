use clap::Subcommand;
use sparkboard_core::coach::currency;
use sparkboard_core::records::goals::SAVE_STEP;
use sparkboard_core::records::SavingsGoal;
use sparkboard_core::{Database, GoalBoard};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// List savings goals
    List,
    /// Create a goal
    Add { title: String, target: f64 },
    /// Put money toward a goal
    Deposit {
        id: String,
        #[arg(default_value_t = SAVE_STEP)]
        amount: f64,
    },
    /// Take money back out of a goal
    Withdraw {
        id: String,
        #[arg(default_value_t = SAVE_STEP)]
        amount: f64,
    },
    /// Delete a goal
    Remove { id: String },
}

pub fn run(action: GoalAction, json: bool) -> CmdResult {
    let db = Database::open()?;
    let mut board = GoalBoard::open(&db);

    match action {
        GoalAction::List => {
            if json {
                return print_json(board.goals());
            }
            if board.goals().is_empty() {
                println!("No savings goals yet.");
            }
            for goal in board.goals() {
                print_goal(goal);
            }
        }
        GoalAction::Add { title, target } => {
            let goal = board.add(&title, target)?;
            emit(&goal, json)?;
        }
        GoalAction::Deposit { id, amount } => {
            let goal = board
                .adjust_saved(&id, amount.abs())?
                .ok_or_else(|| format!("no goal with id {id}"))?;
            emit(&goal, json)?;
        }
        GoalAction::Withdraw { id, amount } => {
            let goal = board
                .adjust_saved(&id, -amount.abs())?
                .ok_or_else(|| format!("no goal with id {id}"))?;
            emit(&goal, json)?;
        }
        GoalAction::Remove { id } => {
            let removed = board.remove(&id)?;
            if json {
                print_json(&serde_json::json!({ "removed": removed }))?;
            } else if removed {
                println!("Removed.");
            } else {
                println!("Nothing to remove.");
            }
        }
    }
    Ok(())
}

fn emit(goal: &SavingsGoal, json: bool) -> CmdResult {
    if json {
        print_json(goal)
    } else {
        print_goal(goal);
        Ok(())
    }
}

fn print_goal(goal: &SavingsGoal) {
    println!(
        "{}  {}  {} / {} ({}%)",
        goal.id,
        goal.title,
        currency(goal.saved),
        currency(goal.target),
        goal.percent()
    );
}
