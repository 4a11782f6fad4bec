//! Budget buckets and the daily income log.
//!
//! Three fixed buckets (needs / wants / savings), each with an allocation
//! and a tracked spend. Spend always stays within `[0, allocated]`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::store::RecordStore;
use super::{finite_or_zero, new_id};
use crate::error::{CoreError, ValidationError};
use crate::storage::keys;
use crate::storage::kv::KvStore;

/// Step used by the dashboard's spend buttons.
pub const SPEND_STEP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    Needs,
    Wants,
    Savings,
}

impl BucketKind {
    pub const ALL: [BucketKind; 3] = [BucketKind::Needs, BucketKind::Wants, BucketKind::Savings];

    /// Share of income under the 50/30/20 rule.
    pub fn share(self) -> f64 {
        match self {
            BucketKind::Needs => 0.5,
            BucketKind::Wants => 0.3,
            BucketKind::Savings => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BucketKind::Needs => "needs",
            BucketKind::Wants => "wants",
            BucketKind::Savings => "savings",
        }
    }
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "needs" => Ok(BucketKind::Needs),
            "wants" => Ok(BucketKind::Wants),
            "savings" => Ok(BucketKind::Savings),
            other => Err(ValidationError::InvalidValue {
                field: "bucket",
                message: format!("unknown bucket '{other}' (expected needs, wants or savings)"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default)]
    pub allocated: f64,
    #[serde(default)]
    pub spent: f64,
}

impl Bucket {
    /// Set the allocation (negative becomes zero) and pull spend back under it.
    pub fn allocate(&mut self, amount: f64) {
        self.allocated = finite_or_zero(amount).max(0.0);
        self.spent = self.spent.max(0.0).min(self.allocated);
    }

    /// Move spend by `delta`, clamped to `[0, allocated]`.
    pub fn adjust_spent(&mut self, delta: f64) {
        let next = self.spent + finite_or_zero(delta);
        self.spent = next.max(0.0).min(self.allocated);
    }

    pub fn remaining(&self) -> f64 {
        self.allocated - self.spent
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Buckets {
    #[serde(default)]
    pub needs: Bucket,
    #[serde(default)]
    pub wants: Bucket,
    #[serde(default)]
    pub savings: Bucket,
}

impl Buckets {
    pub fn get(&self, kind: BucketKind) -> &Bucket {
        match kind {
            BucketKind::Needs => &self.needs,
            BucketKind::Wants => &self.wants,
            BucketKind::Savings => &self.savings,
        }
    }

    pub fn get_mut(&mut self, kind: BucketKind) -> &mut Bucket {
        match kind {
            BucketKind::Needs => &mut self.needs,
            BucketKind::Wants => &mut self.wants,
            BucketKind::Savings => &mut self.savings,
        }
    }

    pub fn total_allocated(&self) -> f64 {
        BucketKind::ALL.iter().map(|k| self.get(*k).allocated).sum()
    }

    /// Allocate `total` across the buckets by the 50/30/20 rule.
    pub fn auto_split(&mut self, total: f64) {
        let total = finite_or_zero(total);
        for kind in BucketKind::ALL {
            self.get_mut(kind).allocate((total * kind.share()).round());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
}

/// Add `amount` to the entry for `date`, creating it if needed.
/// Returns the id of the entry that received the amount.
pub fn add_income(
    entries: &mut Vec<IncomeEntry>,
    date: NaiveDate,
    amount: f64,
) -> Result<String, ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "amount",
            message: "Enter how much you made today.".to_string(),
        });
    }
    if let Some(existing) = entries.iter_mut().find(|e| e.date == date) {
        let merged = existing.amount + amount;
        if !merged.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "amount",
                message: "That day's total is too large.".to_string(),
            });
        }
        existing.amount = merged;
        return Ok(existing.id.clone());
    }
    let id = new_id();
    entries.push(IncomeEntry {
        id: id.clone(),
        date,
        amount,
    });
    Ok(id)
}

pub fn total_earned(entries: &[IncomeEntry]) -> f64 {
    entries.iter().map(|e| finite_or_zero(e.amount)).sum()
}

/// Buckets plus the daily income log.
pub struct BudgetBook<S> {
    buckets: RecordStore<S, Buckets>,
    income: RecordStore<S, Vec<IncomeEntry>>,
}

impl<S: KvStore + Clone> BudgetBook<S> {
    pub fn open(store: S) -> Self {
        Self {
            buckets: RecordStore::load(store.clone(), keys::BUDGET_BUCKETS, Buckets::default()),
            income: RecordStore::load(store, keys::DAILY_INCOME, Vec::new()),
        }
    }

    pub fn buckets(&self) -> &Buckets {
        self.buckets.value()
    }

    pub fn income(&self) -> &[IncomeEntry] {
        self.income.value()
    }

    pub fn total_earned(&self) -> f64 {
        total_earned(self.income.value())
    }

    pub fn total_allocated(&self) -> f64 {
        self.buckets.value().total_allocated()
    }

    /// Earned money not yet assigned to a bucket. Negative when over-allocated.
    pub fn unallocated(&self) -> f64 {
        self.total_earned() - self.total_allocated()
    }

    pub fn add_income(&mut self, date: NaiveDate, amount: f64) -> Result<String, CoreError> {
        self.income
            .try_mutate(|entries| add_income(entries, date, amount).map_err(CoreError::from))
    }

    pub fn allocate(&mut self, kind: BucketKind, amount: f64) -> Result<Bucket, CoreError> {
        Ok(self.buckets.mutate(|b| {
            let bucket = b.get_mut(kind);
            bucket.allocate(amount);
            *bucket
        })?)
    }

    pub fn adjust_spent(&mut self, kind: BucketKind, delta: f64) -> Result<Bucket, CoreError> {
        Ok(self.buckets.mutate(|b| {
            let bucket = b.get_mut(kind);
            bucket.adjust_spent(delta);
            *bucket
        })?)
    }

    pub fn auto_split(&mut self) -> Result<Buckets, CoreError> {
        let total = self.total_earned();
        Ok(self.buckets.mutate(|b| {
            b.auto_split(total);
            b.clone()
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn spend_is_capped_at_allocation() {
        let mut b = Bucket::default();
        b.allocate(50.0);
        for _ in 0..6 {
            b.adjust_spent(SPEND_STEP);
        }
        assert_eq!(b.spent, 50.0);
    }

    #[test]
    fn spend_never_goes_negative() {
        let mut b = Bucket::default();
        b.allocate(30.0);
        b.adjust_spent(-10.0);
        assert_eq!(b.spent, 0.0);
    }

    #[test]
    fn shrinking_allocation_pulls_spend_down() {
        let mut b = Bucket::default();
        b.allocate(100.0);
        b.adjust_spent(80.0);
        b.allocate(40.0);
        assert_eq!(b.spent, 40.0);
    }

    #[test]
    fn negative_or_nan_allocation_is_zero() {
        let mut b = Bucket::default();
        b.allocate(-5.0);
        assert_eq!(b.allocated, 0.0);
        b.allocate(f64::NAN);
        assert_eq!(b.allocated, 0.0);
    }

    #[test]
    fn bucket_kind_parses_case_insensitively() {
        assert_eq!("Wants".parse::<BucketKind>().unwrap(), BucketKind::Wants);
        assert!("fun".parse::<BucketKind>().is_err());
    }

    #[test]
    fn auto_split_uses_fifty_thirty_twenty() {
        let mut buckets = Buckets::default();
        buckets.auto_split(333.0);
        assert_eq!(buckets.needs.allocated, 167.0);
        assert_eq!(buckets.wants.allocated, 100.0);
        assert_eq!(buckets.savings.allocated, 67.0);
    }

    #[test]
    fn same_day_income_is_merged() {
        let mut entries = Vec::new();
        let first = add_income(&mut entries, day(1), 40.0).unwrap();
        let second = add_income(&mut entries, day(1), 15.5).unwrap();
        add_income(&mut entries, day(2), 20.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, 55.5);
        assert_eq!(total_earned(&entries), 75.5);
    }

    #[test]
    fn zero_income_is_rejected() {
        let mut entries = Vec::new();
        assert!(add_income(&mut entries, day(1), 0.0).is_err());
        assert!(add_income(&mut entries, day(1), f64::NAN).is_err());
        assert!(entries.is_empty());
    }

    #[test]
    fn overflowing_merge_is_rejected_and_log_survives() {
        let kv = MemoryKv::new();
        {
            let mut book = BudgetBook::open(&kv);
            book.add_income(day(1), 1e308).unwrap();
            book.add_income(day(2), 25.0).unwrap();
            assert!(book.add_income(day(1), 1e308).is_err());
            assert_eq!(book.income()[0].amount, 1e308);
        }
        let book = BudgetBook::open(&kv);
        assert_eq!(book.income().len(), 2);
        assert_eq!(book.income()[0].amount, 1e308);
        assert_eq!(book.income()[1].amount, 25.0);
    }

    #[test]
    fn book_persists_and_computes_unallocated() {
        let kv = MemoryKv::new();
        {
            let mut book = BudgetBook::open(&kv);
            book.add_income(day(4), 200.0).unwrap();
            book.allocate(BucketKind::Needs, 120.0).unwrap();
            book.adjust_spent(BucketKind::Needs, 30.0).unwrap();
        }
        let book = BudgetBook::open(&kv);
        assert_eq!(book.total_earned(), 200.0);
        assert_eq!(book.buckets().needs.spent, 30.0);
        assert_eq!(book.unallocated(), 80.0);
    }

    #[test]
    fn auto_split_keeps_spend_within_new_allocation() {
        let kv = MemoryKv::new();
        let mut book = BudgetBook::open(&kv);
        book.allocate(BucketKind::Wants, 500.0).unwrap();
        book.adjust_spent(BucketKind::Wants, 200.0).unwrap();
        book.add_income(day(5), 100.0).unwrap();
        let buckets = book.auto_split().unwrap();
        assert_eq!(buckets.wants.allocated, 30.0);
        assert_eq!(buckets.wants.spent, 30.0);
    }

    #[test]
    fn persisted_shape_matches_dashboard_format() {
        let json = serde_json::to_value(Buckets::default()).unwrap();
        assert_eq!(json["needs"]["allocated"], 0.0);
        assert_eq!(json["savings"]["spent"], 0.0);
    }

    proptest! {
        #[test]
        fn spend_stays_in_bounds(
            allocated in 0.0f64..10_000.0,
            deltas in prop::collection::vec(-5_000.0f64..5_000.0, 0..40),
        ) {
            let mut b = Bucket::default();
            b.allocate(allocated);
            for d in deltas {
                b.adjust_spent(d);
                prop_assert!(b.spent >= 0.0);
                prop_assert!(b.spent <= b.allocated);
            }
        }
    }
}
