use tracing::{debug, warn};

use super::{EditState, Vault};
use crate::clock::format_created_at;
use crate::models::entry::{Entry, EntryDraft, EntryId, EntryPatch};
use crate::storage::KeyValueStore;
use crate::validate::validate;
use crate::{Result, VaultError};

/// A user request against the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(EntryDraft),
    BeginEdit(EntryId),
    SaveEdit(EntryPatch),
    CancelEdit,
    Delete(EntryId),
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(EntryId),
    EditStarted { id: EntryId, initial: EntryDraft },
    Updated(EntryId),
    Deleted(EntryId),
    Unchanged,
}

impl Outcome {
    /// True when the list changed and was written to storage.
    pub fn persisted(&self) -> bool {
        matches!(
            self,
            Outcome::Added(_) | Outcome::Updated(_) | Outcome::Deleted(_)
        )
    }
}

impl<S: KeyValueStore> Vault<S> {
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome> {
        match intent {
            Intent::Add(draft) => self.add(draft).map(Outcome::Added),
            Intent::BeginEdit(id) => Ok(match self.begin_edit(id) {
                Some(initial) => Outcome::EditStarted { id, initial },
                None => Outcome::Unchanged,
            }),
            Intent::SaveEdit(patch) => Ok(self
                .save_edit(patch)?
                .map_or(Outcome::Unchanged, Outcome::Updated)),
            Intent::CancelEdit => {
                self.cancel_edit();
                Ok(Outcome::Unchanged)
            }
            Intent::Delete(id) => Ok(if self.delete(id)? {
                Outcome::Deleted(id)
            } else {
                Outcome::Unchanged
            }),
        }
    }

    /// Selects an entry for editing and returns its fields as form values.
    /// An unknown id drops back to idle.
    pub fn begin_edit(&mut self, id: EntryId) -> Option<EntryDraft> {
        match self.get(id).map(EntryDraft::from) {
            Some(initial) => {
                debug!(%id, "begin edit");
                self.edit = EditState::Editing(id);
                Some(initial)
            }
            None => {
                debug!(%id, "begin edit on missing entry");
                self.edit = EditState::Idle;
                None
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        if let EditState::Editing(id) = self.edit {
            debug!(%id, "edit cancelled");
        }
        self.edit = EditState::Idle;
    }

    pub fn add(&mut self, draft: EntryDraft) -> Result<EntryId> {
        if self.edit != EditState::Idle {
            warn!(state = %self.edit, "add rejected");
            return Err(VaultError::InvalidState {
                intent: "add an entry",
                state: self.edit,
            });
        }

        let errors = validate(&draft);
        if !errors.is_empty() {
            return Err(VaultError::Validation(errors));
        }

        let now = self.clock.now();
        let id = self.ids.next(now.timestamp_millis());
        let entry = Entry {
            id,
            website: draft.website,
            username: draft.username,
            password: draft.password,
            notes: draft.notes,
            created_at: format_created_at(now),
        };

        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;

        debug!(%id, "entry added");
        Ok(id)
    }

    /// Merges `patch` onto the entry being edited and returns to idle.
    /// Returns `None` when the selected entry no longer exists.
    pub fn save_edit(&mut self, patch: EntryPatch) -> Result<Option<EntryId>> {
        let id = match self.edit {
            EditState::Editing(id) => id,
            EditState::Idle => {
                warn!("save edit rejected while idle");
                return Err(VaultError::InvalidState {
                    intent: "save an edit",
                    state: self.edit,
                });
            }
        };

        // Legacy data may hold several entries under one id; all of them take the edit.
        let targets: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.id == id)
            .map(|(index, _)| index)
            .collect();
        if targets.is_empty() {
            debug!(%id, "edited entry is gone");
            self.edit = EditState::Idle;
            return Ok(None);
        }

        for &index in &targets {
            let errors = validate(&patch.merged(&self.entries[index]));
            if !errors.is_empty() {
                return Err(VaultError::Validation(errors));
            }
        }

        let mut next = self.entries.clone();
        for &index in &targets {
            patch.clone().apply(&mut next[index]);
        }
        self.commit(next)?;
        self.edit = EditState::Idle;

        debug!(%id, count = targets.len(), "entry updated");
        Ok(Some(id))
    }

    /// Removes every entry carrying `id`. Returns `false`, and writes nothing,
    /// when no entry matched, so deleting twice is the same as deleting once.
    pub fn delete(&mut self, id: EntryId) -> Result<bool> {
        let mut next = self.entries.clone();
        next.retain(|e| e.id != id);
        if next.len() == self.entries.len() {
            debug!(%id, "delete of missing entry");
            return Ok(false);
        }

        let removed = self.entries.len() - next.len();
        self.commit(next)?;

        if self.edit == EditState::Editing(id) {
            self.edit = EditState::Idle;
        }

        debug!(%id, removed, "entry deleted");
        Ok(true)
    }

    /// Writes `next` and only then makes it the in-memory list.
    fn commit(&mut self, next: Vec<Entry>) -> Result<()> {
        self.storage.save(&next)?;
        self.entries = next;
        Ok(())
    }
}
