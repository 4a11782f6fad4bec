use chrono::NaiveDate;
use clap::Subcommand;
use serde_json::json;
use sparkboard_core::coach::currency;
use sparkboard_core::records::budget::SPEND_STEP;
use sparkboard_core::{BucketKind, BudgetBook, Database};

use super::{print_json, today, CmdResult};

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Show buckets, earnings and what is left to assign
    Show,
    /// Log money earned (adds to the day's entry)
    Income {
        amount: f64,
        /// Day the money was earned (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Set how much a bucket gets
    Allocate { bucket: BucketKind, amount: f64 },
    /// Record spending from a bucket (negative to undo)
    Spend {
        bucket: BucketKind,
        #[arg(default_value_t = SPEND_STEP, allow_negative_numbers = true)]
        delta: f64,
    },
    /// Split everything earned 50/30/20 across needs, wants and savings
    AutoSplit,
}

pub fn run(action: BudgetAction, json: bool) -> CmdResult {
    let db = Database::open()?;
    let mut book = BudgetBook::open(&db);

    match action {
        BudgetAction::Show => {}
        BudgetAction::Income { amount, date } => {
            book.add_income(date.unwrap_or_else(today), amount)?;
        }
        BudgetAction::Allocate { bucket, amount } => {
            book.allocate(bucket, amount)?;
        }
        BudgetAction::Spend { bucket, delta } => {
            book.adjust_spent(bucket, delta)?;
        }
        BudgetAction::AutoSplit => {
            book.auto_split()?;
        }
    }

    if json {
        return print_json(&json!({
            "buckets": book.buckets(),
            "income": book.income(),
            "total_earned": book.total_earned(),
            "unallocated": book.unallocated(),
        }));
    }

    println!("Earned: {}", currency(book.total_earned()));
    for kind in BucketKind::ALL {
        let b = book.buckets().get(kind);
        println!(
            "  {:<8} {:>8} allocated  {:>8} spent  {:>8} left",
            kind.as_str(),
            currency(b.allocated),
            currency(b.spent),
            currency(b.remaining())
        );
    }
    let left = book.unallocated();
    if left < 0.0 {
        println!("Over-allocated by {}", currency(-left));
    } else {
        println!("Unallocated: {}", currency(left));
    }
    Ok(())
}
