//! Wall-clock access for id allocation, creation stamps and indicator timers.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Local, TimeZone, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time, so a
/// caller can keep a handle after giving one to a vault.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            millis: Rc::new(Cell::new(millis)),
        }
    }

    pub fn advance_millis(&self, delta: i64) {
        self.millis.set(self.millis.get() + delta);
    }

    pub fn set_millis(&self, millis: i64) {
        self.millis.set(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis.get())
            .single()
            .unwrap_or_default()
    }

    fn now_ms(&self) -> i64 {
        self.millis.get()
    }
}

/// Human-readable local timestamp stored in `createdAt`, e.g. `3/14/2025, 9:26:53 PM`.
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
