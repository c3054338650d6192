//! Tracked documents and their expiry-health classification.
//!
//! A document's health is never stored. It is derived from the raw expiry
//! string supplied by the data layer, a per-kind threshold and the
//! evaluation date, so the same record ages naturally between fetches.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::Error;

/// Upstream serialisers sometimes emit these literals instead of a null.
const ABSENT_LITERALS: [&str; 2] = ["null", "undefined"];

/// Calendar dates, extended (`2027-01-05`) and basic (`20270105`).
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Date-times carrying an offset that RFC 3339 rejects: minute precision,
/// a space separator, `+0400` or Postgres' short `+00`. `%#z` also takes `Z`.
const OFFSET_DATETIME_FORMATS: [&str; 4] = [
  "%Y-%m-%dT%H:%M:%S%.f%#z",
  "%Y-%m-%d %H:%M:%S%.f%#z",
  "%Y-%m-%dT%H:%M%#z",
  "%Y-%m-%d %H:%M%#z",
];

/// Local date-times without an offset. `%.f` also matches an absent
/// fractional part.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

/// Layout for dates embedded in labels, e.g. `Mar 4, 2027`.
const LABEL_DATE_FORMAT: &str = "%b %-d, %Y";

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// The two documents tracked for every subject.
///
/// The display token (`id-card`, `passport`) is also what `FromStr` accepts
/// and what log fields carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DocumentKind {
  /// National ID card or residence permit.
  #[strum(to_string = "id-card")]
  IdCard,
  #[strum(to_string = "passport")]
  Passport,
}

impl FromStr for DocumentKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "id" | "id-card" | "id_card" => Ok(Self::IdCard),
      "passport" => Ok(Self::Passport),
      other => Err(Error::UnknownDocumentKind(other.to_string())),
    }
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// The classified expiry state of a single document. Exactly one holds for
/// any input.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentStatus {
  Valid,
  Expiring,
  Expired,
  Missing,
}

/// Why a document was classified as [`DocumentStatus::Missing`].
///
/// Downstream consumers switch only on the status tag; the reason is kept
/// for callers that want to tell "never supplied" from "garbage supplied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
  /// No value, an empty string, or a serialised `null`/`undefined`.
  Absent,
  /// A value was present but did not parse as a calendar date.
  Unparseable,
}

// ─── Inputs and outputs ──────────────────────────────────────────────────────

/// A document as delivered by the data layer: only the raw expiry string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedDocument {
  pub expiry_date: Option<String>,
}

impl TrackedDocument {
  /// A document with a raw expiry value. Use `default()` for an absent one.
  pub fn with_expiry(raw: impl Into<String>) -> Self {
    Self { expiry_date: Some(raw.into()) }
  }

  /// Classify this document against `threshold_days` as of `today`.
  pub fn health(&self, threshold_days: u32, today: NaiveDate) -> DocumentHealth {
    classify(self.expiry_date.as_deref(), threshold_days, today)
  }
}

/// The output of [`classify`]. Serialised for output only; the missing
/// reason is not part of the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHealth {
  pub status:         DocumentStatus,
  /// Days until expiry, or days since expiry when `status` is `expired`.
  /// `None` when the document is missing.
  pub days_remaining: Option<u64>,
  /// The raw expiry value, echoed back even when it failed to parse.
  pub expires_on:     Option<String>,
  /// Human-readable summary; never empty.
  pub label:          String,
  #[serde(skip)]
  missing_reason:     Option<MissingReason>,
}

impl DocumentHealth {
  fn absent() -> Self {
    Self {
      status:         DocumentStatus::Missing,
      days_remaining: None,
      expires_on:     None,
      label:          "Not provided".to_string(),
      missing_reason: Some(MissingReason::Absent),
    }
  }

  fn unparseable(raw: &str) -> Self {
    Self {
      status:         DocumentStatus::Missing,
      days_remaining: None,
      expires_on:     Some(raw.to_string()),
      label:          "Invalid date".to_string(),
      missing_reason: Some(MissingReason::Unparseable),
    }
  }

  fn dated(status: DocumentStatus, days: u64, raw: &str, label: String) -> Self {
    Self {
      status,
      days_remaining: Some(days),
      expires_on: Some(raw.to_string()),
      label,
      missing_reason: None,
    }
  }

  /// Set only when `status` is [`DocumentStatus::Missing`].
  pub fn missing_reason(&self) -> Option<MissingReason> { self.missing_reason }

  pub fn is_valid(&self) -> bool { self.status == DocumentStatus::Valid }

  pub fn is_expiring(&self) -> bool { self.status == DocumentStatus::Expiring }

  pub fn is_expired(&self) -> bool { self.status == DocumentStatus::Expired }

  pub fn is_missing(&self) -> bool { self.status == DocumentStatus::Missing }
}

impl fmt::Display for DocumentHealth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.label)
  }
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Classify a raw expiry value against an "expiring soon" window.
///
/// Total: every input yields a well-formed [`DocumentHealth`]. A document
/// that expires on `today` is `expiring`, never `expired`.
pub fn classify(
  raw_expiry: Option<&str>,
  threshold_days: u32,
  today: NaiveDate,
) -> DocumentHealth {
  let Some(raw) = raw_expiry.filter(|raw| !is_absent(raw)) else {
    return DocumentHealth::absent();
  };

  let Some(expiry) = parse_expiry(raw) else {
    return DocumentHealth::unparseable(raw);
  };

  let days = expiry.signed_duration_since(today).num_days();
  let remaining = days.unsigned_abs();

  if days < 0 {
    DocumentHealth::dated(
      DocumentStatus::Expired,
      remaining,
      raw,
      format!(
        "Expired on {} ({remaining} days ago)",
        expiry.format(LABEL_DATE_FORMAT)
      ),
    )
  } else if days <= i64::from(threshold_days) {
    DocumentHealth::dated(
      DocumentStatus::Expiring,
      remaining,
      raw,
      format!("Expires in {remaining} days"),
    )
  } else {
    DocumentHealth::dated(
      DocumentStatus::Valid,
      remaining,
      raw,
      format!("Valid until {}", expiry.format(LABEL_DATE_FORMAT)),
    )
  }
}

fn is_absent(raw: &str) -> bool {
  let trimmed = raw.trim();
  trimmed.is_empty() || ABSENT_LITERALS.contains(&trimmed)
}

/// Parse an expiry value into its calendar date.
///
/// Date-times keep the date as written; the offset is not applied, so
/// `2027-01-05T23:30:00-05:00` is the 5th.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();

  if let Some(date) = DATE_FORMATS
    .iter()
    .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
  {
    return Some(date);
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.date_naive());
  }
  if let Some(dt) = OFFSET_DATETIME_FORMATS
    .iter()
    .find_map(|format| DateTime::parse_from_str(raw, format).ok())
  {
    return Some(dt.date_naive());
  }
  NAIVE_DATETIME_FORMATS
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 3, 15).unwrap() }

  fn in_days(n: i64) -> String {
    (today() + chrono::Duration::days(n))
      .format("%Y-%m-%d")
      .to_string()
  }

  // ── Missing ───────────────────────────────────────────────────────────────

  #[test]
  fn absent_inputs_are_not_provided() {
    for raw in [None, Some(""), Some("   "), Some("null"), Some("undefined")] {
      let health = classify(raw, 30, today());
      assert_eq!(health.status, DocumentStatus::Missing, "input {raw:?}");
      assert_eq!(health.expires_on, None);
      assert_eq!(health.days_remaining, None);
      assert_eq!(health.label, "Not provided");
      assert_eq!(health.missing_reason(), Some(MissingReason::Absent));
    }
  }

  #[test]
  fn padded_null_literal_is_absent() {
    let health = classify(Some("  null "), 30, today());
    assert_eq!(health.missing_reason(), Some(MissingReason::Absent));
  }

  #[test]
  fn malformed_input_is_echoed() {
    let health = classify(Some("not-a-date"), 30, today());
    assert_eq!(health.status, DocumentStatus::Missing);
    assert_eq!(health.expires_on.as_deref(), Some("not-a-date"));
    assert_eq!(health.label, "Invalid date");
    assert_eq!(health.days_remaining, None);
    assert_eq!(health.missing_reason(), Some(MissingReason::Unparseable));
  }

  #[test]
  fn impossible_calendar_date_is_invalid() {
    let health = classify(Some("2026-02-30"), 30, today());
    assert_eq!(health.label, "Invalid date");
  }

  // ── Dated ─────────────────────────────────────────────────────────────────

  #[test]
  fn past_date_is_expired_with_absolute_days() {
    let health = classify(Some(in_days(-12).as_str()), 30, today());
    assert_eq!(health.status, DocumentStatus::Expired);
    assert_eq!(health.days_remaining, Some(12));
    assert_eq!(health.label, "Expired on Mar 3, 2026 (12 days ago)");
    assert_eq!(health.missing_reason(), None);
  }

  #[test]
  fn expiring_today_is_expiring_not_expired() {
    let health = classify(Some(in_days(0).as_str()), 30, today());
    assert_eq!(health.status, DocumentStatus::Expiring);
    assert_eq!(health.days_remaining, Some(0));
    assert_eq!(health.label, "Expires in 0 days");
  }

  #[test]
  fn zero_threshold_still_flags_today() {
    assert_eq!(
      classify(Some(in_days(0).as_str()), 0, today()).status,
      DocumentStatus::Expiring
    );
    assert_eq!(
      classify(Some(in_days(1).as_str()), 0, today()).status,
      DocumentStatus::Valid
    );
  }

  #[test]
  fn threshold_boundary_is_inclusive() {
    let at = classify(Some(in_days(30).as_str()), 30, today());
    assert_eq!(at.status, DocumentStatus::Expiring);
    assert_eq!(at.label, "Expires in 30 days");

    let past = classify(Some(in_days(31).as_str()), 30, today());
    assert_eq!(past.status, DocumentStatus::Valid);
    assert_eq!(past.days_remaining, Some(31));
    assert_eq!(past.label, "Valid until Apr 15, 2026");
  }

  #[test]
  fn expires_on_echoes_raw_value() {
    let raw = "2027-01-05T09:00:00Z";
    let health = classify(Some(raw), 60, today());
    assert_eq!(health.expires_on.as_deref(), Some(raw));
    assert_eq!(health.status, DocumentStatus::Valid);
  }

  // ── Parsing ───────────────────────────────────────────────────────────────

  #[test]
  fn parses_supported_layouts() {
    let expected = NaiveDate::from_ymd_opt(2027, 1, 5);
    for raw in [
      "2027-01-05",
      " 2027-01-05 ",
      "2027-01-05T00:00:00Z",
      "2027-01-05T23:30:00-05:00",
      "2027-01-05T08:15:00",
      "2027-01-05T08:15:00.250",
      "2027-01-05 08:15:00",
      "2027-01-05 00:00:00+00",
      "20270105",
      "2027-01-05T10:30",
      "2027-01-05 10:30",
      "2027-01-05T10:30Z",
      "2027-01-05T10:30+04:00",
      "2027-01-05T10:30:00+0400",
    ] {
      assert_eq!(parse_expiry(raw), expected, "layout {raw:?}");
    }
  }

  #[test]
  fn rejects_unsupported_layouts() {
    for raw in ["05/01/2027", "tomorrow", "2027-13-01", "2027-01-05T25:00"] {
      assert_eq!(parse_expiry(raw), None, "layout {raw:?}");
    }
  }

  #[test]
  fn minute_precision_past_date_is_expired() {
    for raw in ["2026-03-01T10:30", "2026-03-01T10:30Z", "20260301"] {
      let health = classify(Some(raw), 30, today());
      assert_eq!(health.status, DocumentStatus::Expired, "input {raw:?}");
      assert_eq!(health.days_remaining, Some(14));
      assert_eq!(health.missing_reason(), None);
    }
  }

  // ── Tokens ────────────────────────────────────────────────────────────────

  #[test]
  fn document_kind_tokens() {
    assert_eq!("id-card".parse::<DocumentKind>().unwrap(), DocumentKind::IdCard);
    assert_eq!("ID".parse::<DocumentKind>().unwrap(), DocumentKind::IdCard);
    assert_eq!(
      "passport".parse::<DocumentKind>().unwrap(),
      DocumentKind::Passport
    );
    assert!("visa".parse::<DocumentKind>().is_err());
    assert_eq!(DocumentKind::IdCard.to_string(), "id-card");
  }

  #[test]
  fn document_kind_display_parses_back() {
    use strum::IntoEnumIterator;

    for kind in DocumentKind::iter() {
      assert_eq!(kind.to_string().parse::<DocumentKind>().unwrap(), kind);
    }
  }

  #[test]
  fn serialises_without_missing_reason() {
    let health = classify(Some("garbage"), 30, today());
    let json = serde_json::to_value(&health).unwrap();
    assert_eq!(json["status"], "missing");
    assert_eq!(json["expires_on"], "garbage");
    assert!(json.get("missing_reason").is_none());
  }
}
