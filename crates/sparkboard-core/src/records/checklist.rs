//! Credit builder checklist. A fixed set of items, toggled in place.

use serde::{Deserialize, Serialize};

use super::store::RecordStore;
use crate::error::CoreError;
use crate::storage::keys;
use crate::storage::kv::KvStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

const TASKS: [&str; 5] = [
    "Get a secured credit card",
    "Set one small bill (Spotify, phone, Netflix) to auto-pay with card",
    "Pay statement balance in full (not just minimum)",
    "Keep card balance under 30% of credit limit",
    "Check credit score monthly (Credit Karma, etc.)",
];

pub fn default_items() -> Vec<ChecklistItem> {
    TASKS
        .iter()
        .zip(1u32..)
        .map(|(task, id)| ChecklistItem {
            id,
            task: (*task).to_string(),
            completed: false,
        })
        .collect()
}

pub struct CreditChecklist<S> {
    items: RecordStore<S, Vec<ChecklistItem>>,
}

impl<S: KvStore> CreditChecklist<S> {
    pub fn open(store: S) -> Self {
        Self {
            items: RecordStore::load(store, keys::CREDIT_CHECKLIST, default_items()),
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        self.items.value()
    }

    /// Flip an item. Returns its new state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: u32) -> Result<Option<bool>, CoreError> {
        if !self.items.value().iter().any(|i| i.id == id) {
            return Ok(None);
        }
        Ok(self.items.mutate(|items| {
            items.iter_mut().find(|i| i.id == id).map(|i| {
                i.completed = !i.completed;
                i.completed
            })
        })?)
    }

    /// Completed item count.
    pub fn stars(&self) -> usize {
        self.items.value().iter().filter(|i| i.completed).count()
    }

    pub fn all_complete(&self) -> bool {
        let items = self.items.value();
        !items.is_empty() && items.iter().all(|i| i.completed)
    }
}
