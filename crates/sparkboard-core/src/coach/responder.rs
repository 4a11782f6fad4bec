//! Keyword-driven replies for the money coach.
//!
//! Intents are matched in table order against the lowercased message and the
//! first hit wins. Anything unmatched falls through to [`Intent::Banter`].

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::format::currency;
use super::insights::{compute_insights, Snapshot};

/// Opening lines. The first greets a new chat, the second a cleared one.
pub const ATTITUDE: [&str; 3] = [
    "Okay, money wizard. Let’s see what chaos you’ve brewed. 🧙‍♀️",
    "I come with receipts and vibes. Let’s talk coins. 💅",
    "I’m not judging… I’m just narrating your wallet’s journey. Loudly.",
];

const BULLET: &str = "\n• ";

const HONESTY_PREAMBLE: &str = "You asked for honesty, not mercy. Here we go:";
const TINY_FIX: &str = "Tiny fix: cap your top category by 10% for the next 7 days. Deal?";
const NO_GOAL: &str = "Add a savings goal and I’ll give you a mini game plan.";
const MICRO_CHALLENGE: &str = "Micro-challenge: move $15 today and rename it “Future Me Tax.”";
const CHALLENGE_MENU: &str = "Challenge menu: 3‑day “Home Drinks Only”, 5‑day “$0 impulse buys”, or 7‑day “$5 to goals daily”. Pick one and I’ll track it.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Roast,
    Budget,
    Savings,
    Challenge,
    Banter,
}

/// Ordered match table.
const RULES: &[(Intent, &[&str])] = &[
    (Intent::Roast, &["roast", "honest", "truth"]),
    (Intent::Budget, &["budget", "spend", "leftover"]),
    (Intent::Savings, &["goal", "save"]),
    (Intent::Challenge, &["challenge", "cap", "streak"]),
];

impl Intent {
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        RULES
            .iter()
            .find(|(_, words)| words.iter().any(|w| text.contains(w)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Banter)
    }
}

/// Reply to `text` given the current numbers. `rng` picks the banter opener.
pub fn respond<R: Rng + ?Sized>(text: &str, snapshot: &Snapshot, rng: &mut R) -> String {
    let insights = compute_insights(snapshot);
    match Intent::classify(text) {
        Intent::Roast => bulleted(
            std::iter::once(HONESTY_PREAMBLE.to_string())
                .chain(insights.into_iter().take(3))
                .chain(std::iter::once(TINY_FIX.to_string())),
        ),
        Intent::Budget => bulleted(
            std::iter::once("Budget vibes:".to_string())
                .chain(insights.into_iter().take(2))
                .chain(std::iter::once(remaining_tip(snapshot))),
        ),
        Intent::Savings => {
            let line = insights
                .iter()
                .find(|l| l.contains("Goal"))
                .map(String::as_str)
                .unwrap_or(NO_GOAL);
            format!("Savings check: {line}{BULLET}{MICRO_CHALLENGE}")
        }
        Intent::Challenge => CHALLENGE_MENU.to_string(),
        Intent::Banter => {
            let opener = ATTITUDE.choose(rng).copied().unwrap_or(ATTITUDE[0]);
            let first = insights.first().map(String::as_str).unwrap_or_default();
            format!("{opener}{BULLET}{first}")
        }
    }
}

/// What to do with the money left after planned spending.
pub fn remaining_tip(snapshot: &Snapshot) -> String {
    if snapshot.income() == 0.0 {
        return "Add monthly income so I can calculate what’s left to play with.".to_string();
    }
    let left = snapshot.remaining();
    if left < 0.0 {
        format!(
            "You’re over {}. Trim the top category by 10% — painless, promise.",
            currency(left.abs())
        )
    } else if left == 0.0 {
        "Balanced perfectly. Smells like discipline. Also smells like no boba.".to_string()
    } else {
        format!(
            "Leftover {}. Split it 70/30: goals vs treats. Future-you says thanks.",
            currency(left)
        )
    }
}

fn bulleted(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join(BULLET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::insights::{BudgetItem, BLANK_SLATE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn classify_follows_table_order() {
        assert_eq!(Intent::classify("Be HONEST about my budget"), Intent::Roast);
        assert_eq!(Intent::classify("what's my leftover"), Intent::Budget);
        assert_eq!(Intent::classify("help me save"), Intent::Savings);
        assert_eq!(Intent::classify("start a streak"), Intent::Challenge);
        assert_eq!(Intent::classify("hi"), Intent::Banter);
    }

    #[test]
    fn roast_on_empty_snapshot() {
        let reply = respond("roast me", &Snapshot::default(), &mut rng());
        assert_eq!(
            reply,
            format!("{HONESTY_PREAMBLE}\n• {BLANK_SLATE}\n• {TINY_FIX}")
        );
    }

    #[test]
    fn budget_reply_ends_with_tip() {
        let snap = Snapshot {
            income: 500.0,
            items: vec![BudgetItem::new("needs", 500.0)],
            goals: vec![],
        };
        let reply = respond("budget check", &snap, &mut rng());
        let parts: Vec<_> = reply.split(BULLET).collect();
        assert_eq!(parts[0], "Budget vibes:");
        assert_eq!(parts.len(), 4);
        assert_eq!(
            parts[3],
            "Balanced perfectly. Smells like discipline. Also smells like no boba."
        );
    }

    #[test]
    fn savings_without_goals() {
        let reply = respond("goal?", &Snapshot::default(), &mut rng());
        assert_eq!(reply, format!("Savings check: {NO_GOAL}\n• {MICRO_CHALLENGE}"));
    }

    #[test]
    fn challenge_menu_is_fixed() {
        assert_eq!(respond("cap it", &Snapshot::default(), &mut rng()), CHALLENGE_MENU);
    }

    #[test]
    fn banter_uses_an_attitude_line() {
        let reply = respond("hey", &Snapshot::default(), &mut rng());
        let (opener, rest) = reply.split_once(BULLET).unwrap();
        assert!(ATTITUDE.contains(&opener));
        assert_eq!(rest, BLANK_SLATE);
    }

    #[test]
    fn remaining_tip_bands() {
        let mut snap = Snapshot::default();
        assert!(remaining_tip(&snap).starts_with("Add monthly income"));
        snap.income = 100.0;
        snap.items = vec![BudgetItem::new("wants", 150.0)];
        assert_eq!(
            remaining_tip(&snap),
            "You’re over $50. Trim the top category by 10% — painless, promise."
        );
        snap.items = vec![BudgetItem::new("wants", 40.0)];
        assert!(remaining_tip(&snap).starts_with("Leftover $60."));
    }
}
