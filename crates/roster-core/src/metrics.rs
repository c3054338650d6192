//! Dashboard metrics over a collection of evaluated subjects.
//!
//! `critical` and `expiring` are counted from raw document health, not from
//! [`OverallStatus`]. A terminated subject with an expired passport is
//! `inactive` on its badge but still counts as critical here: the document
//! itself is out of compliance whatever the lifecycle says.

use serde::Serialize;

use crate::{status::OverallStatus, subject::SubjectView};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Number of subjects carrying each overall status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
  pub active:   u64,
  pub warning:  u64,
  pub critical: u64,
  pub inactive: u64,
}

impl StatusCounts {
  pub fn get(&self, status: OverallStatus) -> u64 {
    match status {
      OverallStatus::Active => self.active,
      OverallStatus::Warning => self.warning,
      OverallStatus::Critical => self.critical,
      OverallStatus::Inactive => self.inactive,
    }
  }

  fn bump(&mut self, status: OverallStatus) {
    match status {
      OverallStatus::Active => self.active += 1,
      OverallStatus::Warning => self.warning += 1,
      OverallStatus::Critical => self.critical += 1,
      OverallStatus::Inactive => self.inactive += 1,
    }
  }

  fn merge(self, other: Self) -> Self {
    Self {
      active:   self.active + other.active,
      warning:  self.warning + other.warning,
      critical: self.critical + other.critical,
      inactive: self.inactive + other.inactive,
    }
  }
}

/// Summary counters for cards and charts. Buckets overlap: one subject can
/// be critical, expiring and unassigned at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
  pub total:           u64,
  /// Subjects whose overall status is `active`.
  pub active:          u64,
  /// Subjects with at least one expired document.
  pub critical:        u64,
  /// Subjects with at least one document inside its expiring window.
  pub expiring:        u64,
  /// Subjects without an employer reference.
  pub unassigned:      u64,
  /// Percentage (0–100, rounded half up) of subjects whose documents are
  /// both valid. Zero for an empty collection.
  pub compliance_rate: u8,
  pub by_status:       StatusCounts,
}

// ─── Tally ───────────────────────────────────────────────────────────────────

/// Partial counts; merge tallies from separate chunks, then [`finish`].
///
/// [`finish`]: MetricsTally::finish
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsTally {
  total:      u64,
  critical:   u64,
  expiring:   u64,
  unassigned: u64,
  compliant:  u64,
  by_status:  StatusCounts,
}

impl MetricsTally {
  pub fn record(&mut self, view: &SubjectView) {
    self.total += 1;
    self.by_status.bump(view.overall_status);
    if view.has_expired_document() {
      self.critical += 1;
    }
    if view.has_expiring_document() {
      self.expiring += 1;
    }
    if !view.subject.is_assigned() {
      self.unassigned += 1;
    }
    if view.is_compliant() {
      self.compliant += 1;
    }
  }

  pub fn merge(self, other: Self) -> Self {
    Self {
      total:      self.total + other.total,
      critical:   self.critical + other.critical,
      expiring:   self.expiring + other.expiring,
      unassigned: self.unassigned + other.unassigned,
      compliant:  self.compliant + other.compliant,
      by_status:  self.by_status.merge(other.by_status),
    }
  }

  pub fn finish(self) -> MetricsSnapshot {
    MetricsSnapshot {
      total:           self.total,
      active:          self.by_status.active,
      critical:        self.critical,
      expiring:        self.expiring,
      unassigned:      self.unassigned,
      compliance_rate: percentage(self.compliant, self.total),
      by_status:       self.by_status,
    }
  }
}

impl<'a> Extend<&'a SubjectView> for MetricsTally {
  fn extend<I: IntoIterator<Item = &'a SubjectView>>(&mut self, iter: I) {
    for view in iter {
      self.record(view);
    }
  }
}

/// Fold `views` into a [`MetricsSnapshot`] in a single pass.
pub fn aggregate<'a>(
  views: impl IntoIterator<Item = &'a SubjectView>,
) -> MetricsSnapshot {
  let mut tally = MetricsTally::default();
  tally.extend(views);
  tally.finish()
}

/// `round(100 * part / whole)` with halves rounded up; `0` when `whole` is 0.
fn percentage(part: u64, whole: u64) -> u8 {
  if whole == 0 {
    return 0;
  }
  let rounded = (u128::from(part) * 200 + u128::from(whole))
    / (u128::from(whole) * 2);
  u8::try_from(rounded.min(100)).unwrap_or(100)
}
