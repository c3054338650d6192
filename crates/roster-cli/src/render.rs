//! Plain-text rendering of listings and metrics.

use std::fmt::Write as _;

use roster_core::{
  metrics::MetricsSnapshot,
  status::OverallStatus,
  subject::SubjectView,
};
use strum::IntoEnumIterator;

/// Characters of the subject id shown in tables.
const SHORT_ID_LEN: usize = 8;

/// Render evaluated subjects as a fixed-width table.
pub fn table(views: &[&SubjectView]) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:<8}  {:<24}  {:<12}  {:<8}  {:<38}  {:<38}  {}",
    "ID", "NAME", "LIFECYCLE", "STATUS", "ID CARD", "PASSPORT", "ASSIGNED"
  );
  for view in views {
    let id = view.subject.subject_id.to_string();
    let _ = writeln!(
      out,
      "{:<8}  {:<24}  {:<12}  {:<8}  {:<38}  {:<38}  {}",
      &id[..SHORT_ID_LEN],
      truncate(view.subject.display_name.as_deref().unwrap_or("—"), 24),
      truncate(view.subject.lifecycle.as_str(), 12),
      view.overall_status.to_string(),
      view.id_health.label,
      view.passport_health.label,
      if view.subject.is_assigned() { "yes" } else { "no" },
    );
  }
  out
}

/// Render a metrics snapshot as aligned key/value lines.
pub fn metrics(snapshot: &MetricsSnapshot) -> String {
  let mut out = String::new();
  let rows = [
    ("total", snapshot.total.to_string()),
    ("active", snapshot.active.to_string()),
    ("critical", snapshot.critical.to_string()),
    ("expiring", snapshot.expiring.to_string()),
    ("unassigned", snapshot.unassigned.to_string()),
    ("compliance", format!("{}%", snapshot.compliance_rate)),
  ];
  for (key, value) in rows {
    let _ = writeln!(out, "{key:<12} {value:>6}");
  }

  let _ = writeln!(out, "\nby status");
  for status in OverallStatus::iter() {
    let _ = writeln!(
      out,
      "  {:<10} {:>6}",
      status.to_string(),
      snapshot.by_status.get(status)
    );
  }
  out
}

/// Serialise any output value as pretty JSON.
pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
  Ok(serde_json::to_string_pretty(value)?)
}

fn truncate(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    return s.to_string();
  }
  let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
  cut.push('…');
  cut
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use roster_core::{
    document::TrackedDocument,
    lifecycle::LifecycleState,
    metrics::aggregate,
    policy::ExpiryPolicy,
    subject::Subject,
  };
  use uuid::Uuid;

  use super::*;

  fn view() -> SubjectView {
    let subject = Subject {
      subject_id:        Uuid::from_u128(0xabcdef12_0000_4000_8000_000000000001),
      display_name:      Some("Omar Farouk".into()),
      lifecycle:         LifecycleState::Active,
      id_document:       TrackedDocument::with_expiry("2026-11-01"),
      passport_document: TrackedDocument::default(),
      employer_id:       None,
    };
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    SubjectView::evaluate(subject, &ExpiryPolicy::default(), today)
  }

  #[test]
  fn table_has_header_and_row() {
    let v = view();
    let out = table(&[&v]);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ID"));
    assert!(lines[1].starts_with("abcdef12"));
    assert!(lines[1].contains("Omar Farouk"));
    assert!(lines[1].contains("warning"));
    assert!(lines[1].contains("Expires in 13 days"));
    assert!(lines[1].contains("Not provided"));
    assert!(lines[1].ends_with("no"));
  }

  #[test]
  fn metrics_lists_counts_and_rate() {
    let v = view();
    let out = metrics(&aggregate([&v]));
    assert!(out.contains("total             1"));
    assert!(out.contains("compliance       0%"));
    assert!(out.contains("  warning         1"));
  }

  #[test]
  fn truncates_long_names() {
    assert_eq!(truncate("abcdef", 4), "abc…");
    assert_eq!(truncate("abc", 4), "abc");
  }

  #[test]
  fn json_output_uses_snake_case_fields() {
    let out = json(&view()).unwrap();
    assert!(out.contains("\"overall_status\": \"warning\""));
    assert!(out.contains("\"days_remaining\": 13"));
  }
}
