use zeroize::Zeroize;

use crate::generator::{generate_password_with, DEFAULT_PASSWORD_LENGTH};
use crate::models::entry::{EntryDraft, EntryId, EntryPatch};
use crate::validate::{validate, Field, FieldErrors};
use crate::vault::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Editing(EntryId),
}

/// A validated form submission, ready to hand to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Add(EntryDraft),
    SaveEdit(EntryPatch),
}

impl From<Submission> for Intent {
    fn from(submission: Submission) -> Self {
        match submission {
            Submission::Add(draft) => Intent::Add(draft),
            Submission::SaveEdit(patch) => Intent::SaveEdit(patch),
        }
    }
}

/// Entry form state: values, per-field errors, password visibility.
#[derive(Debug)]
pub struct EntryForm {
    mode: FormMode,
    values: EntryDraft,
    errors: FieldErrors,
    show_password: bool,
    password_length: usize,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::New,
            values: EntryDraft::default(),
            errors: FieldErrors::default(),
            show_password: false,
            password_length: DEFAULT_PASSWORD_LENGTH,
        }
    }

    /// Form prefilled from the entry being edited.
    pub fn editing(id: EntryId, initial: EntryDraft) -> Self {
        let mut form = Self::new();
        form.mode = FormMode::Editing(id);
        form.values = initial;
        form
    }

    pub fn with_password_length(mut self, length: usize) -> Self {
        self.password_length = length;
        self
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    pub fn values(&self) -> &EntryDraft {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Website => &self.values.website,
            Field::Username => &self.values.username,
            Field::Password => &self.values.password,
            Field::Notes => &self.values.notes,
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Updates one field. Editing a field clears its error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Website => &mut self.values.website,
            Field::Username => &mut self.values.username,
            Field::Password => &mut self.values.password,
            Field::Notes => &mut self.values.notes,
        };
        let mut old = std::mem::replace(slot, value.into());
        if field == Field::Password {
            old.zeroize();
        }
        self.errors.clear(field);
    }

    /// Overwrites the password with a freshly generated one.
    pub fn generate_password(&mut self) {
        let generated = generate_password_with(&mut rand::thread_rng(), self.password_length);
        self.set_field(Field::Password, generated);
    }

    /// Validates the current values. On failure the errors are kept and the
    /// inputs left as typed; on success the form resets to a blank new-entry form.
    pub fn submit(&mut self) -> Option<Submission> {
        let submission = self.prepare()?;
        self.complete();
        Some(submission)
    }

    /// Like [`submit`](Self::submit) but leaves the values in place, so the
    /// input survives if the vault then rejects the submission. Call
    /// [`complete`](Self::complete) once it has been accepted.
    pub fn prepare(&mut self) -> Option<Submission> {
        let errors = validate(&self.values);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }

        let draft = self.values.clone();
        Some(match self.mode {
            FormMode::New => Submission::Add(draft),
            FormMode::Editing(_) => Submission::SaveEdit(EntryPatch::from(draft)),
        })
    }

    /// Resets to a blank new-entry form after an accepted submission.
    pub fn complete(&mut self) {
        self.reset();
    }

    /// Discards in-progress input. Returns the cancel intent when an edit was open.
    pub fn cancel(&mut self) -> Option<Intent> {
        let was_editing = self.is_editing();
        self.reset();
        was_editing.then_some(Intent::CancelEdit)
    }

    fn reset(&mut self) {
        self.values.password.zeroize();
        self.values = EntryDraft::default();
        self.errors = FieldErrors::default();
        self.show_password = false;
        self.mode = FormMode::New;
    }
}

impl Drop for EntryForm {
    fn drop(&mut self) {
        self.values.password.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PASSWORD_CHARSET;

    fn filled() -> EntryForm {
        let mut form = EntryForm::new();
        form.set_field(Field::Website, "Gmail");
        form.set_field(Field::Username, "me@x.com");
        form.set_field(Field::Password, "abcdef");
        form
    }

    #[test]
    fn failed_submit_keeps_inputs_and_reports_errors() {
        let mut form = EntryForm::new();
        form.set_field(Field::Username, "a");
        form.set_field(Field::Password, "12345");

        assert!(form.submit().is_none());
        assert_eq!(form.error(Field::Website), Some("Website is required"));
        assert_eq!(
            form.error(Field::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(form.value(Field::Username), "a");
        assert_eq!(form.value(Field::Password), "12345");
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = EntryForm::new();
        form.submit();
        assert_eq!(form.errors().len(), 3);

        form.set_field(Field::Website, "G");
        assert_eq!(form.error(Field::Website), None);
        assert!(form.error(Field::Username).is_some());
        assert!(form.error(Field::Password).is_some());
    }

    #[test]
    fn successful_submit_resets_form() {
        let mut form = filled();
        form.set_field(Field::Notes, "personal");
        form.toggle_password_visibility();

        let submission = form.submit().unwrap();
        assert_eq!(
            submission,
            Submission::Add(EntryDraft::new("Gmail", "me@x.com", "abcdef").with_notes("personal"))
        );
        assert_eq!(form.values(), &EntryDraft::default());
        assert!(form.errors().is_empty());
        assert!(!form.password_visible());
    }

    #[test]
    fn edit_form_submits_a_patch() {
        let id = EntryId(77);
        let mut form = EntryForm::editing(id, EntryDraft::new("Gmail", "me@x.com", "abcdef"));
        assert!(form.is_editing());
        form.set_field(Field::Password, "newpass1");

        let Some(Submission::SaveEdit(patch)) = form.submit() else {
            panic!("expected a save-edit submission");
        };
        assert_eq!(patch.password.as_deref(), Some("newpass1"));
        assert_eq!(patch.website.as_deref(), Some("Gmail"));
        assert_eq!(form.mode(), FormMode::New);
    }

    #[test]
    fn prepare_keeps_values_until_completed() {
        let mut form = filled();
        let submission = form.prepare().unwrap();
        assert_eq!(
            submission,
            Submission::Add(EntryDraft::new("Gmail", "me@x.com", "abcdef"))
        );
        assert_eq!(form.value(Field::Password), "abcdef");

        form.complete();
        assert_eq!(form.values(), &EntryDraft::default());
    }

    #[test]
    fn cancel_only_emits_intent_when_editing() {
        let mut form = EntryForm::editing(EntryId(1), EntryDraft::new("a", "b", "cccccc"));
        assert_eq!(form.cancel(), Some(Intent::CancelEdit));
        assert_eq!(form.values(), &EntryDraft::default());

        let mut blank = filled();
        assert_eq!(blank.cancel(), None);
        assert_eq!(blank.value(Field::Website), "");
    }

    #[test]
    fn generate_password_overwrites_and_clears_error() {
        let mut form = EntryForm::new().with_password_length(20);
        form.set_field(Field::Password, "123");
        form.submit();
        assert!(form.error(Field::Password).is_some());

        form.generate_password();
        let password = form.value(Field::Password);
        assert_eq!(password.len(), 20);
        assert!(password.bytes().all(|b| PASSWORD_CHARSET.contains(&b)));
        assert_eq!(form.error(Field::Password), None);
    }

    #[test]
    fn submission_converts_to_intent() {
        let draft = EntryDraft::new("a", "b", "cccccc");
        assert_eq!(
            Intent::from(Submission::Add(draft.clone())),
            Intent::Add(draft)
        );
    }
}
