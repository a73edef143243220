//! Cyber Vault core library
//!
//! Platform-independent pieces of the local credential vault: the entry
//! model, the JSON storage adapter, the vault container that mediates every
//! mutation, the field validator, the password generator and the ephemeral
//! presentation state (form, list view, save indicator).

pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod storage;
pub mod ui;
pub mod validate;
pub mod vault;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::VaultConfig;
pub use error::{Result, VaultError};
pub use generator::generate_password;
pub use models::entry::{Entry, EntryDraft, EntryId, EntryPatch};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageAdapter};
pub use ui::{Clipboard, CopyField, EntryForm, EntryRow, FormMode, ListView, SaveStatus, Submission};
pub use validate::{validate, Field, FieldErrors};
pub use vault::{EditState, Intent, Outcome, Vault};
