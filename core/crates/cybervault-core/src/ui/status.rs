use chrono::{DateTime, Duration, Utc};

pub const SAVED_LABEL: &str = "Saved";

/// Transient "Saved" indicator shown after each persisted mutation.
#[derive(Debug, Clone)]
pub struct SaveStatus {
    until: Option<DateTime<Utc>>,
    flash: Duration,
}

impl SaveStatus {
    pub fn new(flash: Duration) -> Self {
        Self { until: None, flash }
    }

    pub fn mark_saved(&mut self, now: DateTime<Utc>) {
        self.until = Some(flash_deadline(now, self.flash));
    }

    pub fn current(&self, now: DateTime<Utc>) -> Option<&'static str> {
        match self.until {
            Some(until) if now < until => Some(SAVED_LABEL),
            _ => None,
        }
    }

    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.current(now).is_none() {
            self.until = None;
        }
    }
}

/// `now + flash`, saturating at the end of chrono's range.
pub(crate) fn flash_deadline(now: DateTime<Utc>, flash: Duration) -> DateTime<Utc> {
    now.checked_add_signed(flash).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
