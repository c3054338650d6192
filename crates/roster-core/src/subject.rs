//! Subject — a tracked workforce member, and its evaluated view.
//!
//! A [`Subject`] is exactly what the data layer hands over: lifecycle token,
//! two raw document expiries and an employer reference. The [`SubjectView`]
//! is assembled on read by classifying those inputs at an evaluation date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  clock::Clock,
  document::{DocumentHealth, DocumentKind, TrackedDocument},
  lifecycle::LifecycleState,
  policy::ExpiryPolicy,
  status::{OverallStatus, resolve},
};

/// A workforce member as fetched; request-scoped, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub subject_id:        Uuid,
  pub display_name:      Option<String>,
  #[serde(default)]
  pub lifecycle:         LifecycleState,
  #[serde(default)]
  pub id_document:       TrackedDocument,
  #[serde(default)]
  pub passport_document: TrackedDocument,
  /// Foreign key of the employing organisation, if any.
  pub employer_id:       Option<String>,
}

impl Subject {
  /// A subject with no name, no documents, no employer and an unset
  /// lifecycle.
  pub fn new(subject_id: Uuid) -> Self {
    Self {
      subject_id,
      display_name: None,
      lifecycle: LifecycleState::Unset,
      id_document: TrackedDocument::default(),
      passport_document: TrackedDocument::default(),
      employer_id: None,
    }
  }

  pub fn document(&self, kind: DocumentKind) -> &TrackedDocument {
    match kind {
      DocumentKind::IdCard => &self.id_document,
      DocumentKind::Passport => &self.passport_document,
    }
  }

  /// Whether the subject has a non-blank employer reference.
  pub fn is_assigned(&self) -> bool {
    self
      .employer_id
      .as_deref()
      .is_some_and(|id| !id.trim().is_empty())
  }
}

// ─── Evaluated view ──────────────────────────────────────────────────────────

/// The computed read model for a subject — never stored, always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectView {
  pub subject:         Subject,
  /// The calendar date the documents were classified against.
  pub as_of:           NaiveDate,
  pub id_health:       DocumentHealth,
  pub passport_health: DocumentHealth,
  pub overall_status:  OverallStatus,
}

impl SubjectView {
  /// Classify both documents under `policy` and resolve the overall status.
  pub fn evaluate(
    subject: Subject,
    policy: &ExpiryPolicy,
    today: NaiveDate,
  ) -> Self {
    let id_health = subject
      .id_document
      .health(policy.threshold_for(DocumentKind::IdCard), today);
    let passport_health = subject
      .passport_document
      .health(policy.threshold_for(DocumentKind::Passport), today);
    let overall_status =
      resolve(&subject.lifecycle, &id_health, &passport_health);

    Self {
      subject,
      as_of: today,
      id_health,
      passport_health,
      overall_status,
    }
  }

  pub fn health(&self, kind: DocumentKind) -> &DocumentHealth {
    match kind {
      DocumentKind::IdCard => &self.id_health,
      DocumentKind::Passport => &self.passport_health,
    }
  }

  /// Either document is past its expiry date, regardless of lifecycle.
  pub fn has_expired_document(&self) -> bool {
    self.id_health.is_expired() || self.passport_health.is_expired()
  }

  /// Either document falls inside its expiring window, regardless of
  /// lifecycle.
  pub fn has_expiring_document(&self) -> bool {
    self.id_health.is_expiring() || self.passport_health.is_expiring()
  }

  /// Both documents are valid.
  pub fn is_compliant(&self) -> bool {
    self.id_health.is_valid() && self.passport_health.is_valid()
  }
}

/// Evaluate a batch of subjects against a single reading of `clock`, so every
/// view in the batch shares the same `as_of`.
pub fn evaluate_all<C: Clock>(
  subjects: impl IntoIterator<Item = Subject>,
  policy: &ExpiryPolicy,
  clock: C,
) -> Vec<SubjectView> {
  let today = clock.today();
  subjects
    .into_iter()
    .map(|subject| SubjectView::evaluate(subject, policy, today))
    .collect()
}
