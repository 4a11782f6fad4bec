//! Prayer wall entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::new_id;
use super::store::RecordStore;
use crate::error::{CoreError, ValidationError};
use crate::storage::keys;
use crate::storage::kv::KvStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerEntry {
    pub id: String,
    pub text: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub prayed_count: u32,
    #[serde(default)]
    pub answered: bool,
}

pub struct PrayerWall<S> {
    prayers: RecordStore<S, Vec<PrayerEntry>>,
}

impl<S: KvStore> PrayerWall<S> {
    pub fn open(store: S) -> Self {
        Self {
            prayers: RecordStore::load(store, keys::PRAYERS, Vec::new()),
        }
    }

    pub fn all(&self) -> &[PrayerEntry] {
        self.prayers.value()
    }

    pub fn unanswered(&self) -> impl Iterator<Item = &PrayerEntry> {
        self.prayers.value().iter().filter(|p| !p.answered)
    }

    pub fn answered(&self) -> impl Iterator<Item = &PrayerEntry> {
        self.prayers.value().iter().filter(|p| p.answered)
    }

    pub fn add(&mut self, text: &str, date: NaiveDate) -> Result<PrayerEntry, CoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty("text", "Type your prayer request first.").into());
        }
        let entry = PrayerEntry {
            id: new_id(),
            text: text.to_string(),
            date,
            prayed_count: 0,
            answered: false,
        };
        let created = entry.clone();
        self.prayers.mutate(|prayers| prayers.push(entry))?;
        Ok(created)
    }

    /// Count one more prayer. Returns the new count.
    pub fn pray_for(&mut self, id: &str) -> Result<Option<u32>, CoreError> {
        self.update(id, |p| {
            p.prayed_count = p.prayed_count.saturating_add(1);
            p.prayed_count
        })
    }

    /// Flip answered / unanswered. Returns the new state.
    pub fn toggle_answered(&mut self, id: &str) -> Result<Option<bool>, CoreError> {
        self.update(id, |p| {
            p.answered = !p.answered;
            p.answered
        })
    }

    /// Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool, CoreError> {
        if !self.prayers.value().iter().any(|p| p.id == id) {
            return Ok(false);
        }
        self.prayers.mutate(|prayers| prayers.retain(|p| p.id != id))?;
        Ok(true)
    }

    fn update<R>(
        &mut self,
        id: &str,
        op: impl FnOnce(&mut PrayerEntry) -> R,
    ) -> Result<Option<R>, CoreError> {
        if !self.prayers.value().iter().any(|p| p.id == id) {
            return Ok(None);
        }
        Ok(self
            .prayers
            .mutate(|prayers| prayers.iter_mut().find(|p| p.id == id).map(op))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn empty_prayer_is_rejected_without_mutation() {
        let kv = MemoryKv::new();
        let mut wall = PrayerWall::open(&kv);
        assert!(wall.add("  \n ", today()).is_err());
        assert!(wall.all().is_empty());
        assert!(kv.is_empty());
    }

    #[test]
    fn prayed_count_only_increments() {
        let kv = MemoryKv::new();
        let mut wall = PrayerWall::open(&kv);
        let p = wall.add("For grandma's surgery", today()).unwrap();
        assert_eq!(wall.pray_for(&p.id).unwrap(), Some(1));
        assert_eq!(wall.pray_for(&p.id).unwrap(), Some(2));
        assert_eq!(PrayerWall::open(&kv).all()[0].prayed_count, 2);
    }

    #[test]
    fn answered_moves_between_views() {
        let kv = MemoryKv::new();
        let mut wall = PrayerWall::open(&kv);
        let a = wall.add("Exams", today()).unwrap();
        wall.add("New job", today()).unwrap();
        assert_eq!(wall.toggle_answered(&a.id).unwrap(), Some(true));
        assert_eq!(wall.answered().count(), 1);
        assert_eq!(wall.unanswered().count(), 1);
        assert_eq!(wall.toggle_answered(&a.id).unwrap(), Some(false));
        assert_eq!(wall.answered().count(), 0);
    }

    #[test]
    fn delete_twice_is_noop() {
        let kv = MemoryKv::new();
        let mut wall = PrayerWall::open(&kv);
        let p = wall.add("Peace", today()).unwrap();
        assert!(wall.delete(&p.id).unwrap());
        assert!(!wall.delete(&p.id).unwrap());
        assert_eq!(wall.pray_for(&p.id).unwrap(), None);
    }

    #[test]
    fn persisted_fields_are_camel_case() {
        let entry = PrayerEntry {
            id: "x".into(),
            text: "t".into(),
            date: today(),
            prayed_count: 3,
            answered: false,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["prayedCount"], 3);
        assert_eq!(json["date"], "2025-06-01");
    }
}
