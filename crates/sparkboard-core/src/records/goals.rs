//! Savings goals.

use serde::{Deserialize, Serialize};

use super::store::RecordStore;
use super::{finite_or_zero, new_id};
use crate::error::{CoreError, ValidationError};
use crate::storage::keys;
use crate::storage::kv::KvStore;

/// Step used by the dashboard's goal buttons.
pub const SAVE_STEP: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: String,
    pub title: String,
    pub target: f64,
    #[serde(default)]
    pub saved: f64,
}

impl SavingsGoal {
    pub fn new(title: &str, target: f64) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::empty("title", "Give your goal a name."));
        }
        if !target.is_finite() || target <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "target",
                message: "Target must be more than $0.".to_string(),
            });
        }
        Ok(Self {
            id: new_id(),
            title: title.to_string(),
            target,
            saved: 0.0,
        })
    }

    /// Move `saved` by `delta`, clamped to `[0, target]`.
    pub fn adjust_saved(&mut self, delta: f64) {
        let next = finite_or_zero(self.saved) + finite_or_zero(delta);
        self.saved = next.max(0.0).min(self.target.max(0.0));
    }

    /// Whole percent saved, 0 when the target is not positive.
    pub fn percent(&self) -> u32 {
        if self.target > 0.0 {
            (finite_or_zero(self.saved) / self.target * 100.0).round().max(0.0) as u32
        } else {
            0
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.target - self.saved).max(0.0)
    }
}

pub struct GoalBoard<S> {
    goals: RecordStore<S, Vec<SavingsGoal>>,
}

impl<S: KvStore> GoalBoard<S> {
    pub fn open(store: S) -> Self {
        Self {
            goals: RecordStore::load(store, keys::SAVINGS_GOALS, Vec::new()),
        }
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        self.goals.value()
    }

    pub fn get(&self, id: &str) -> Option<&SavingsGoal> {
        self.goals.value().iter().find(|g| g.id == id)
    }

    pub fn add(&mut self, title: &str, target: f64) -> Result<SavingsGoal, CoreError> {
        let goal = SavingsGoal::new(title, target)?;
        let created = goal.clone();
        self.goals.mutate(|goals| goals.push(goal))?;
        Ok(created)
    }

    /// Returns the updated goal, or `None` if no goal has this id.
    pub fn adjust_saved(&mut self, id: &str, delta: f64) -> Result<Option<SavingsGoal>, CoreError> {
        if self.get(id).is_none() {
            return Ok(None);
        }
        Ok(self.goals.mutate(|goals| {
            goals.iter_mut().find(|g| g.id == id).map(|g| {
                g.adjust_saved(delta);
                g.clone()
            })
        })?)
    }

    /// Remove a goal. Returns whether anything was removed; removing an
    /// unknown id is a no-op.
    pub fn remove(&mut self, id: &str) -> Result<bool, CoreError> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        self.goals.mutate(|goals| goals.retain(|g| g.id != id))?;
        Ok(true)
    }
}
