use tracing::{debug, warn};

use super::format::{decode_entries, encode_entries};
use super::KeyValueStore;
use crate::models::entry::Entry;
use crate::Result;

/// Reads and writes the whole entry list under one key.
pub struct StorageAdapter<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Stored entries in order. Missing, unreadable or malformed data
    /// degrades to an empty list.
    pub fn load(&self) -> Vec<Entry> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "storage read failed, starting empty");
                return Vec::new();
            }
        };

        match decode_entries(&raw) {
            Ok(entries) => {
                debug!(key = %self.key, count = entries.len(), "loaded entries");
                entries
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored vault is malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrites the key with the full list.
    pub fn save(&mut self, entries: &[Entry]) -> Result<()> {
        let json = encode_entries(entries)?;
        self.store.set_item(&self.key, &json)?;
        debug!(key = %self.key, count = entries.len(), "saved entries");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::EntryId;
    use crate::storage::MemoryStore;
    use crate::VaultError;

    const KEY: &str = "cyber_vault_passwords";

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(VaultError::Storage("quota exceeded".into()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(VaultError::Storage("quota exceeded".into()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn entry(id: u64) -> Entry {
        Entry {
            id: EntryId(id),
            website: format!("site-{id}"),
            username: "u".into(),
            password: "pppppp".into(),
            notes: String::new(),
            created_at: "now".into(),
        }
    }

    #[test]
    fn empty_store_loads_nothing() {
        let adapter = StorageAdapter::new(MemoryStore::new(), KEY);
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn save_then_load_keeps_order() {
        let store = MemoryStore::new();
        let mut adapter = StorageAdapter::new(store.clone(), KEY);
        adapter.save(&[entry(9), entry(2), entry(5)]).unwrap();

        let reloaded = StorageAdapter::new(store, KEY).load();
        let ids: Vec<u64> = reloaded.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[test]
    fn malformed_data_loads_empty() {
        let mut store = MemoryStore::new();
        store.set_item(KEY, "definitely not json").unwrap();
        assert!(StorageAdapter::new(store, KEY).load().is_empty());
    }

    #[test]
    fn read_failure_loads_empty_and_write_failure_surfaces() {
        let mut adapter = StorageAdapter::new(BrokenStore, KEY);
        assert!(adapter.load().is_empty());
        assert!(matches!(adapter.save(&[]), Err(VaultError::Storage(_))));
    }

    #[test]
    fn clear_removes_the_key() {
        let store = MemoryStore::new();
        let mut adapter = StorageAdapter::new(store.clone(), KEY);
        adapter.save(&[entry(1)]).unwrap();
        adapter.clear().unwrap();
        assert!(store.get_item(KEY).unwrap().is_none());
    }
}
