//! Vault container: the ordered entry list, the edit selection, and the
//! intents that mutate them. Every mutation is persisted before it returns.

mod ids;
mod ops;

pub use ids::IdAllocator;
pub use ops::{Intent, Outcome};

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::VaultConfig;
use crate::models::entry::{Entry, EntryId};
use crate::storage::{KeyValueStore, StorageAdapter};

/// Which entry, if any, the form is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "camelCase")]
pub enum EditState {
    #[default]
    Idle,
    Editing(EntryId),
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditState::Idle => f.write_str("idle"),
            EditState::Editing(id) => write!(f, "editing entry {id}"),
        }
    }
}

pub struct Vault<S> {
    entries: Vec<Entry>,
    edit: EditState,
    storage: StorageAdapter<S>,
    ids: IdAllocator,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> Vault<S> {
    /// Loads the stored list once and starts idle.
    pub fn open(store: S, config: &VaultConfig) -> Self {
        Self::open_with_clock(store, config, Box::new(SystemClock))
    }

    pub fn open_with_clock(store: S, config: &VaultConfig, clock: Box<dyn Clock>) -> Self {
        let storage = StorageAdapter::new(store, config.storage_key.clone());
        let entries = storage.load();
        let ids = IdAllocator::seeded(&entries);
        info!(key = %storage.key(), count = entries.len(), "vault opened");

        Self {
            entries,
            edit: EditState::Idle,
            storage,
            ids,
            clock,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// First entry carrying `id`.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    /// The entry currently selected for editing.
    pub fn editing(&self) -> Option<&Entry> {
        match self.edit {
            EditState::Editing(id) => self.get(id),
            EditState::Idle => None,
        }
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    pub fn into_store(self) -> S {
        self.storage.into_store()
    }
}
