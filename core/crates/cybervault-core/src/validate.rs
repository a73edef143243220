//! Field validation for entry submissions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::entry::EntryDraft;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const WEBSITE_REQUIRED: &str = "Website is required";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

/// Editable entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Website,
    Username,
    Password,
    Notes,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Website => "website",
            Field::Username => "username",
            Field::Password => "password",
            Field::Notes => "notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(Field::Website),
            "username" => Ok(Field::Username),
            "password" => Ok(Field::Password),
            "notes" => Ok(Field::Notes),
            other => Err(format!("Unknown field: {other}")),
        }
    }
}

/// Field name to message, one per violated field. Empty means the draft may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Drops the error for one field, e.g. once the user edits it again.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn set(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn validate(draft: &EntryDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.website.trim().is_empty() {
        errors.set(Field::Website, WEBSITE_REQUIRED);
    }
    if draft.username.trim().is_empty() {
        errors.set(Field::Username, USERNAME_REQUIRED);
    }
    if draft.password.trim().is_empty() {
        errors.set(Field::Password, PASSWORD_REQUIRED);
    }
    // Length message wins over the emptiness one. Counted in UTF-16 units,
    // as browsers measure it.
    if draft.password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        errors.set(Field::Password, PASSWORD_TOO_SHORT);
    }

    errors
}
