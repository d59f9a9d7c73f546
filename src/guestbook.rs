use crate::constants::{PACIFIC_TZ, TIMESTAMP_FMT};
use crate::entry::{sort_newest_first, Entry, NewEntry};
use crate::store::{EntryStore, StoreError};
use crate::validation::{validate, Limits, ValidationError};
use chrono::{DateTime, Utc};

/// Source of the instant stamped onto new entries.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formats `instant` as US/Pacific local time using [`TIMESTAMP_FMT`].
pub fn pacific_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&PACIFIC_TZ)
        .format(TIMESTAMP_FMT)
        .to_string()
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted(Entry),
    Rejected(ValidationError),
}

#[derive(Debug, thiserror::Error)]
pub enum GuestbookError {
    #[error("Storage failed: {0}")]
    Store(#[from] StoreError),
}

/// Validates, timestamps and stores submissions; serves them back newest first.
pub struct Guestbook {
    store: EntryStore,
    clock: Box<dyn Clock>,
    limits: Limits,
}

impl Guestbook {
    pub fn new(store: EntryStore) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: EntryStore, clock: Box<dyn Clock>) -> Self {
        Guestbook {
            store,
            clock,
            limits: Limits::default(),
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn submit(&self, name: &str, message: &str) -> Result<SubmitOutcome, GuestbookError> {
        let submission = match validate(&self.limits, name, message) {
            Ok(submission) => submission,
            Err(err) => return Ok(SubmitOutcome::Rejected(err)),
        };
        let entry = NewEntry {
            name: submission.name,
            message: submission.message,
            timestamp: pacific_timestamp(self.clock.now()),
        };
        let stored = self.store.append(&entry)?;
        Ok(SubmitOutcome::Accepted(stored))
    }

    /// All entries, newest first.
    pub fn entries(&self) -> Result<Vec<Entry>, GuestbookError> {
        let mut entries = self.store.list_all()?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    pub fn count(&self) -> Result<usize, GuestbookError> {
        Ok(self.store.count()?)
    }
}
