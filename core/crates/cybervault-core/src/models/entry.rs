use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric entry id. Stored as a plain JSON number.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored credential, in its persisted shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub website: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
}

/// The user-editable fields of an entry, as submitted by the form.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EntryDraft {
    pub website: String,
    pub username: String,
    pub password: String,
    pub notes: String,
}

impl EntryDraft {
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            username: username.into(),
            password: password.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl From<&Entry> for EntryDraft {
    fn from(entry: &Entry) -> Self {
        Self {
            website: entry.website.clone(),
            username: entry.username.clone(),
            password: entry.password.clone(),
            notes: entry.notes.clone(),
        }
    }
}

/// Partial update for an existing entry. `None` keeps the stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub website: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub notes: Option<String>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn website(mut self, value: impl Into<String>) -> Self {
        self.website = Some(value.into());
        self
    }

    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = Some(value.into());
        self
    }

    pub fn password(mut self, value: impl Into<String>) -> Self {
        self.password = Some(value.into());
        self
    }

    pub fn notes(mut self, value: impl Into<String>) -> Self {
        self.notes = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.website.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.notes.is_none()
    }

    /// Editable fields of `entry` after this patch, without touching `entry`.
    pub fn merged(&self, entry: &Entry) -> EntryDraft {
        EntryDraft {
            website: pick(&self.website, &entry.website),
            username: pick(&self.username, &entry.username),
            password: pick(&self.password, &entry.password),
            notes: pick(&self.notes, &entry.notes),
        }
    }

    /// Writes the present fields onto `entry`. `id` and `created_at` are never touched.
    pub fn apply(self, entry: &mut Entry) {
        if let Some(website) = self.website {
            entry.website = website;
        }
        if let Some(username) = self.username {
            entry.username = username;
        }
        if let Some(password) = self.password {
            entry.password = password;
        }
        if let Some(notes) = self.notes {
            entry.notes = notes;
        }
    }
}

impl From<EntryDraft> for EntryPatch {
    fn from(draft: EntryDraft) -> Self {
        Self {
            website: Some(draft.website),
            username: Some(draft.username),
            password: Some(draft.password),
            notes: Some(draft.notes),
        }
    }
}

fn pick(patch: &Option<String>, current: &str) -> String {
    patch.as_deref().unwrap_or(current).to_string()
}
