//! Durable key-value storage and the entry-list adapter on top of it.

pub mod adapter;
pub mod file;
pub mod format;
pub mod memory;

pub use adapter::StorageAdapter;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::Result;

/// String key-value store with `localStorage` semantics: `set_item`
/// overwrites, reading an unknown key yields `None`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}
