use chrono::{NaiveDate, Utc};

/// Source of "today" for date validation.
///
/// The running service uses [`SystemClock`], which takes the calendar date in
/// UTC rather than the host's local timezone, so "today" rolls over at UTC
/// midnight wherever the server runs.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Server wall clock, calendar date in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
