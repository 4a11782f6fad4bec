//! Budget snapshot and the observations the coach draws from it.
//!
//! Insights are derived on every reply and never stored.

use serde::{Deserialize, Serialize};

use super::format::currency;
use crate::records::budget::{BucketKind, BudgetBook};
use crate::records::goals::{GoalBoard, SavingsGoal};
use crate::records::finite_or_zero;
use crate::storage::kv::KvStore;

pub const BLANK_SLATE: &str =
    "Blank slate energy. Add income and a couple categories and I’ll bring the spice.";
pub const QUIET: &str =
    "Shockingly quiet in here. Add a goal or category and I’ll spill the tea.";

/// One planned spending line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub name: String,
    pub amount: f64,
}

impl BudgetItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Read-only view of the numbers the coach talks about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub income: f64,
    pub items: Vec<BudgetItem>,
    pub goals: Vec<SavingsGoal>,
}

impl Snapshot {
    /// Income is everything earned so far; each funded bucket is an item.
    pub fn from_stores<B, G>(budget: &BudgetBook<B>, goals: &GoalBoard<G>) -> Self
    where
        B: KvStore + Clone,
        G: KvStore,
    {
        let buckets = budget.buckets();
        let items = BucketKind::ALL
            .iter()
            .map(|kind| (kind, buckets.get(*kind).allocated))
            .filter(|(_, allocated)| *allocated > 0.0)
            .map(|(kind, allocated)| BudgetItem::new(kind.as_str(), allocated))
            .collect();

        Self {
            income: budget.total_earned(),
            items,
            goals: goals.goals().to_vec(),
        }
    }

    pub fn income(&self) -> f64 {
        finite_or_zero(self.income)
    }

    pub fn total_planned(&self) -> f64 {
        self.items.iter().map(|i| finite_or_zero(i.amount)).sum()
    }

    /// Income minus planned spending; negative when over.
    pub fn remaining(&self) -> f64 {
        self.income() - self.total_planned()
    }

    /// Items by amount, largest first. Ties keep entry order.
    fn ranked(&self) -> Vec<&BudgetItem> {
        let mut sorted: Vec<&BudgetItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| finite_or_zero(b.amount).total_cmp(&finite_or_zero(a.amount)));
        sorted
    }
}

/// Observations in display order. Never empty.
pub fn compute_insights(snapshot: &Snapshot) -> Vec<String> {
    let income = snapshot.income();
    let items = &snapshot.items;
    let mut lines = Vec::new();

    if income == 0.0 && items.is_empty() && snapshot.goals.is_empty() {
        lines.push(BLANK_SLATE.to_string());
        return lines;
    }

    if income != 0.0 {
        lines.push(format!(
            "You set income at {}. Bold. Let’s make it behave.",
            currency(income)
        ));
    }

    if !items.is_empty() {
        let remaining = snapshot.remaining();
        let verdict = if remaining >= 0.0 {
            format!("Leftover: {} (don’t spend it all on boba).", currency(remaining))
        } else {
            format!("You’re over by {}. We need a tiny trim.", currency(remaining.abs()))
        };
        lines.push(format!(
            "You planned {} across {} categories. {}",
            currency(snapshot.total_planned()),
            items.len(),
            verdict
        ));

        let ranked = snapshot.ranked();
        if let Some(top) = ranked.first() {
            let next = ranked
                .get(1)
                .map(|s| format!("— next is {} at {}.", s.name, currency(s.amount)))
                .unwrap_or_default();
            lines.push(format!(
                "Top category: {} at {} {}",
                top.name,
                currency(top.amount),
                next
            ));
        }

        let threshold = if income != 0.0 { income * 0.15 } else { 200.0 };
        let heavy: Vec<&str> = items
            .iter()
            .filter(|i| finite_or_zero(i.amount) > threshold)
            .map(|i| i.name.as_str())
            .collect();
        if heavy.len() >= 2 {
            lines.push(format!(
                "These are looking thicc: {}. Want a mini-cap next week?",
                heavy.iter().take(3).copied().collect::<Vec<_>>().join(", ")
            ));
        }
    }

    lines.extend(snapshot.goals.iter().map(goal_line));

    if lines.is_empty() {
        lines.push(QUIET.to_string());
    }
    lines
}

fn goal_line(goal: &SavingsGoal) -> String {
    let pct = goal.percent();
    if pct >= 100 {
        format!("Goal “{}”: 100% — flex achieved. 🎉", goal.title)
    } else if pct >= 60 {
        let left = goal.target - finite_or_zero(goal.saved);
        let top_up = (left / 4.0).round().max(10.0);
        format!(
            "Goal “{}”: {}% — we’re in the home stretch. Toss {} this week?",
            goal.title,
            pct,
            currency(top_up)
        )
    } else {
        format!(
            "Goal “{}”: {}% — slow and shiny. Try +$15 every Friday?",
            goal.title, pct
        )
    }
}
