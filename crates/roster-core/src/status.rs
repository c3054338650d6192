//! Overall status — the single badge shown for a subject on dashboards.

use std::str::FromStr;

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{
  Error,
  document::{DocumentHealth, DocumentStatus},
  lifecycle::LifecycleState,
};

/// Aggregate status combining lifecycle state and both tracked documents.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display,
  EnumIter, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OverallStatus {
  Active,
  Warning,
  Critical,
  Inactive,
}

impl OverallStatus {
  /// Attention rank used when sorting dashboards: higher sorts first.
  pub fn severity(self) -> u8 {
    match self {
      Self::Critical => 3,
      Self::Warning => 2,
      Self::Active => 1,
      Self::Inactive => 0,
    }
  }
}

impl FromStr for OverallStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let needle = s.trim().to_ascii_lowercase();
    Self::iter()
      .find(|status| status.to_string() == needle)
      .ok_or_else(|| Error::UnknownStatus(s.to_string()))
  }
}

/// Resolve a subject's overall status. First match wins:
///
/// 1. inactive or unset lifecycle → `Inactive`, whatever the documents say;
/// 2. either document expired → `Critical`;
/// 3. either document expiring → `Warning`;
/// 4. both documents missing → `Warning`;
/// 5. otherwise → `Active`.
///
/// A single missing document is tolerated (step 5); only a subject with
/// neither document on file is flagged.
pub fn resolve(
  lifecycle: &LifecycleState,
  id: &DocumentHealth,
  passport: &DocumentHealth,
) -> OverallStatus {
  use DocumentStatus::*;

  if lifecycle.is_inactive() {
    return OverallStatus::Inactive;
  }

  match (id.status, passport.status) {
    (Expired, _) | (_, Expired) => OverallStatus::Critical,
    (Expiring, _) | (_, Expiring) => OverallStatus::Warning,
    (Missing, Missing) => OverallStatus::Warning,
    _ => OverallStatus::Active,
  }
}
