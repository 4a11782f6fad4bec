//! Write-through persisted value.
//!
//! A [`RecordStore`] owns one key. Mutations run against a copy of the
//! current value; the copy is persisted and only then becomes the in-memory
//! value, so memory and storage agree after every call, including failed
//! ones.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::storage::kv::{load_json, save_json, KvStore};

#[derive(Debug)]
pub struct RecordStore<S, T> {
    store: S,
    key: &'static str,
    default: T,
    value: T,
}

impl<S, T> RecordStore<S, T>
where
    S: KvStore,
    T: Serialize + DeserializeOwned + Clone,
{
    /// Read `key`, or start from `default` if it is absent or unreadable.
    pub fn load(store: S, key: &'static str, default: T) -> Self {
        let value = load_json(&store, key, default.clone());
        Self {
            store,
            key,
            default,
            value,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Apply `op` and persist the result.
    ///
    /// On a storage failure the in-memory value is left untouched.
    pub fn mutate<R>(&mut self, op: impl FnOnce(&mut T) -> R) -> Result<R, StorageError> {
        let mut next = self.value.clone();
        let out = op(&mut next);
        save_json(&self.store, self.key, &next)?;
        self.value = next;
        Ok(out)
    }

    /// Like [`mutate`](Self::mutate), but `op` may reject the change.
    /// A rejected change is neither applied nor persisted.
    pub fn try_mutate<R, E>(&mut self, op: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let mut next = self.value.clone();
        let out = op(&mut next)?;
        save_json(&self.store, self.key, &next)?;
        self.value = next;
        Ok(out)
    }

    pub fn replace(&mut self, value: T) -> Result<(), StorageError> {
        self.mutate(|v| *v = value)
    }

    /// Put the default back, both in memory and on disk.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let default = self.default.clone();
        self.replace(default)
    }

    /// Re-read the persisted value, picking up writes made elsewhere.
    pub fn reload(&mut self) {
        self.value = load_json(&self.store, self.key, self.default.clone());
    }
}
