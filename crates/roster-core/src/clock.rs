//! Evaluation-date injection.
//!
//! Classification never reads the wall clock directly; callers pass a
//! [`Clock`] (or a plain date) so tests can freeze time.

use chrono::{Local, NaiveDate};

/// Source of "today" for document classification.
pub trait Clock {
  fn today(&self) -> NaiveDate;
}

/// The current calendar date in the host's local time zone, so a document
/// expiring tonight is still `expiring` until local midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}
