//! Dashboard filtering, sorting and paging over evaluated subjects.

use std::{cmp::Ordering, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{
  Error,
  document::{DocumentKind, parse_expiry},
  status::OverallStatus,
  subject::SubjectView,
};

// ─── Sort key ────────────────────────────────────────────────────────────────

/// Ordering applied to a filtered listing. Ties are broken by subject id so
/// results are stable across runs.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
  /// Display name, case-insensitive; unnamed subjects last.
  #[default]
  Name,
  /// Most severe overall status first.
  Status,
  /// Soonest parseable expiry of either document first; none last.
  Expiry,
}

impl FromStr for SortKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let needle = s.trim().to_ascii_lowercase();
    Self::iter()
      .find(|key| key.to_string() == needle)
      .ok_or_else(|| Error::UnknownSortKey(s.to_string()))
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`SubjectQuery::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectQuery {
  /// Keep only subjects with this overall status.
  pub status:          Option<OverallStatus>,
  /// Case-insensitive substring over display name and subject id.
  pub text:            Option<String>,
  /// Keep only subjects without an employer reference.
  pub unassigned_only: bool,
  pub sort:            SortKey,
  pub limit:           Option<usize>,
  pub offset:          Option<usize>,
}

impl SubjectQuery {
  /// Whether `view` passes every filter in this query.
  pub fn matches(&self, view: &SubjectView) -> bool {
    if self.status.is_some_and(|status| status != view.overall_status) {
      return false;
    }
    if self.unassigned_only && view.subject.is_assigned() {
      return false;
    }
    match self.text.as_deref().map(str::trim) {
      None | Some("") => true,
      Some(text) => matches_text(view, &text.to_lowercase()),
    }
  }

  /// Filter, sort, then page `views`.
  pub fn apply<'a>(&self, views: &'a [SubjectView]) -> Vec<&'a SubjectView> {
    let mut selected: Vec<&SubjectView> =
      views.iter().filter(|view| self.matches(view)).collect();
    selected.sort_by(|a, b| compare(self.sort, a, b));

    selected
      .into_iter()
      .skip(self.offset.unwrap_or(0))
      .take(self.limit.unwrap_or(usize::MAX))
      .collect()
  }
}

fn matches_text(view: &SubjectView, needle: &str) -> bool {
  let name_hit = view
    .subject
    .display_name
    .as_deref()
    .is_some_and(|name| name.to_lowercase().contains(needle));
  name_hit || view.subject.subject_id.to_string().contains(needle)
}

fn compare(key: SortKey, a: &SubjectView, b: &SubjectView) -> Ordering {
  let primary = match key {
    SortKey::Name => none_last(name_key(a), name_key(b)),
    SortKey::Status => b
      .overall_status
      .severity()
      .cmp(&a.overall_status.severity()),
    SortKey::Expiry => none_last(soonest_expiry(a), soonest_expiry(b)),
  };
  primary.then_with(|| a.subject.subject_id.cmp(&b.subject.subject_id))
}

fn none_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
  match (a, b) {
    (Some(a), Some(b)) => a.cmp(&b),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

fn name_key(view: &SubjectView) -> Option<String> {
  view
    .subject
    .display_name
    .as_deref()
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(str::to_lowercase)
}

/// The earliest parseable expiry date across both documents.
pub fn soonest_expiry(view: &SubjectView) -> Option<NaiveDate> {
  [DocumentKind::IdCard, DocumentKind::Passport]
    .into_iter()
    .filter_map(|kind| view.subject.document(kind).expiry_date.as_deref())
    .filter_map(parse_expiry)
    .min()
}
