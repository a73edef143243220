use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::status::flash_deadline;
use crate::models::entry::{Entry, EntryId};

pub const EMPTY_LIST_TITLE: &str = "No passwords stored yet";
pub const EMPTY_LIST_HINT: &str = "Add your first password to begin";

const MASK: char = '•';

/// Receives text to put on the system clipboard. Fire-and-forget.
pub trait Clipboard {
    fn copy_text(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyField {
    Username,
    Password,
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    pub id: EntryId,
    pub website: String,
    pub username: String,
    /// Plain text when revealed, masked otherwise.
    pub password: String,
    pub revealed: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub username_copied: bool,
    pub password_copied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CopiedFlag {
    id: EntryId,
    field: CopyField,
    until: DateTime<Utc>,
}

/// Reveal and copy-confirmation flags for the entry list.
#[derive(Debug, Clone)]
pub struct ListView {
    revealed: Option<EntryId>,
    copied: Option<CopiedFlag>,
    copy_flash: Duration,
}

impl ListView {
    pub fn new(copy_flash: Duration) -> Self {
        Self {
            revealed: None,
            copied: None,
            copy_flash,
        }
    }

    pub fn revealed(&self) -> Option<EntryId> {
        self.revealed
    }

    /// Shows this entry's password, or hides it if it is the one shown.
    pub fn toggle_reveal(&mut self, id: EntryId) {
        self.revealed = if self.revealed == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn display_password(&self, entry: &Entry) -> String {
        if self.revealed == Some(entry.id) {
            entry.password.clone()
        } else {
            mask(&entry.password)
        }
    }

    pub fn copy<C: Clipboard + ?Sized>(
        &mut self,
        entry: &Entry,
        field: CopyField,
        clipboard: &mut C,
        now: DateTime<Utc>,
    ) {
        let text = match field {
            CopyField::Username => &entry.username,
            CopyField::Password => &entry.password,
        };
        clipboard.copy_text(text);
        self.copied = Some(CopiedFlag {
            id: entry.id,
            field,
            until: flash_deadline(now, self.copy_flash),
        });
    }

    pub fn is_copied(&self, id: EntryId, field: CopyField, now: DateTime<Utc>) -> bool {
        self.copied
            .is_some_and(|flag| flag.id == id && flag.field == field && now < flag.until)
    }

    /// Drops an expired copy confirmation.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.copied.is_some_and(|flag| now >= flag.until) {
            self.copied = None;
        }
    }

    /// Forgets flags pointing at an entry that is gone.
    pub fn forget(&mut self, id: EntryId) {
        if self.revealed == Some(id) {
            self.revealed = None;
        }
        if self.copied.is_some_and(|flag| flag.id == id) {
            self.copied = None;
        }
    }

    pub fn rows(&self, entries: &[Entry], now: DateTime<Utc>) -> Vec<EntryRow> {
        entries
            .iter()
            .map(|entry| EntryRow {
                id: entry.id,
                website: entry.website.clone(),
                username: entry.username.clone(),
                password: self.display_password(entry),
                revealed: self.revealed == Some(entry.id),
                notes: (!entry.notes.is_empty()).then(|| entry.notes.clone()),
                created_at: entry.created_at.clone(),
                username_copied: self.is_copied(entry.id, CopyField::Username, now),
                password_copied: self.is_copied(entry.id, CopyField::Password, now),
            })
            .collect()
    }
}

fn mask(password: &str) -> String {
    std::iter::repeat(MASK).take(password.chars().count()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Default)]
    struct RecordingClipboard(Vec<String>);

    impl Clipboard for RecordingClipboard {
        fn copy_text(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    fn entry(id: u64, password: &str) -> Entry {
        Entry {
            id: EntryId(id),
            website: "Gmail".into(),
            username: "me@x.com".into(),
            password: password.into(),
            notes: String::new(),
            created_at: "today".into(),
        }
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn passwords_are_masked_until_revealed() {
        let mut view = ListView::new(Duration::milliseconds(2000));
        let e = entry(1, "hunter22");
        assert_eq!(view.display_password(&e), "••••••••");

        view.toggle_reveal(e.id);
        assert_eq!(view.display_password(&e), "hunter22");

        view.toggle_reveal(e.id);
        assert_eq!(view.revealed(), None);
    }

    #[test]
    fn only_one_entry_is_revealed() {
        let mut view = ListView::new(Duration::milliseconds(2000));
        let (a, b) = (entry(1, "aaaaaa"), entry(2, "bbbbbb"));
        view.toggle_reveal(a.id);
        view.toggle_reveal(b.id);
        assert_eq!(view.display_password(&a), "••••••");
        assert_eq!(view.display_password(&b), "bbbbbb");
    }

    #[test]
    fn copy_hands_text_to_clipboard_and_flashes() {
        let mut view = ListView::new(Duration::milliseconds(2000));
        let mut clipboard = RecordingClipboard::default();
        let e = entry(1, "hunter22");

        view.copy(&e, CopyField::Password, &mut clipboard, at(10_000));
        assert_eq!(clipboard.0, vec!["hunter22".to_string()]);
        assert!(view.is_copied(e.id, CopyField::Password, at(11_999)));
        assert!(!view.is_copied(e.id, CopyField::Username, at(11_000)));
        assert!(!view.is_copied(e.id, CopyField::Password, at(12_000)));

        view.copy(&e, CopyField::Username, &mut clipboard, at(12_500));
        assert!(!view.is_copied(e.id, CopyField::Password, at(12_600)));
        assert!(view.is_copied(e.id, CopyField::Username, at(12_600)));

        view.tick(at(20_000));
        assert!(view.copied.is_none());
    }

    #[test]
    fn copy_with_unbounded_flash_stays_flagged() {
        let mut view = ListView::new(Duration::MAX);
        let mut clipboard = RecordingClipboard::default();
        let e = entry(1, "hunter22");

        view.copy(&e, CopyField::Password, &mut clipboard, Utc::now());
        assert!(view.is_copied(e.id, CopyField::Password, Utc::now()));
    }

    #[test]
    fn forget_clears_flags_for_deleted_entry() {
        let mut view = ListView::new(Duration::milliseconds(2000));
        let mut clipboard = RecordingClipboard::default();
        let e = entry(3, "hunter22");
        view.toggle_reveal(e.id);
        view.copy(&e, CopyField::Username, &mut clipboard, at(0));

        view.forget(e.id);
        assert_eq!(view.revealed(), None);
        assert!(!view.is_copied(e.id, CopyField::Username, at(1)));
    }

    #[test]
    fn rows_hide_empty_notes() {
        let view = ListView::new(Duration::milliseconds(2000));
        let mut with_notes = entry(2, "pppppp");
        with_notes.notes = "security question: blue".into();

        let rows = view.rows(&[entry(1, "pppppp"), with_notes], at(0));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].notes, None);
        assert_eq!(rows[1].notes.as_deref(), Some("security question: blue"));
        assert!(!rows[0].revealed);
        assert_eq!(rows[0].password, "••••••");
    }
}
