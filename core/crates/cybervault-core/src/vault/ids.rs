use crate::models::entry::{Entry, EntryId};

/// Hands out entry ids from the creation time in milliseconds, bumped past
/// the last id issued so two entries created in the same tick never collide.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Starts above every id already present.
    pub fn seeded(entries: &[Entry]) -> Self {
        Self {
            last: entries.iter().map(|e| e.id.0).max().unwrap_or(0),
        }
    }

    pub fn next(&mut self, now_ms: i64) -> EntryId {
        let candidate = u64::try_from(now_ms).unwrap_or(0);
        let id = candidate.max(self.last.saturating_add(1));
        self.last = id;
        EntryId(id)
    }
}
