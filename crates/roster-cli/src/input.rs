//! Subject records from a JSON export.
//!
//! The export is a JSON array of flat records as produced by the hosted data
//! API. Field names follow that API; a few common aliases are accepted.
//! Unknown fields are ignored.

use std::{
  io::Read,
  path::{Path, PathBuf},
};

use roster_core::{
  document::TrackedDocument,
  lifecycle::LifecycleState,
  source::SubjectSource,
  subject::Subject,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::InputError;

/// Path that selects standard input instead of a file.
const STDIN_PATH: &str = "-";

/// One record of the export.
#[derive(Debug, Deserialize)]
pub struct SubjectRecord {
  #[serde(alias = "subject_id")]
  pub id:              Uuid,
  #[serde(default, alias = "display_name", alias = "name_en")]
  pub name:            Option<String>,
  #[serde(default)]
  pub status:          Option<String>,
  #[serde(default, alias = "id_card_expiry_date")]
  pub id_card_expiry:  Option<String>,
  #[serde(default, alias = "passport_expiry_date")]
  pub passport_expiry: Option<String>,
  #[serde(default)]
  pub employer_id:     Option<String>,
}

impl From<SubjectRecord> for Subject {
  fn from(record: SubjectRecord) -> Self {
    Subject {
      subject_id:        record.id,
      display_name:      record.name,
      lifecycle:         LifecycleState::from_token(record.status.as_deref()),
      id_document:       TrackedDocument { expiry_date: record.id_card_expiry },
      passport_document: TrackedDocument {
        expiry_date: record.passport_expiry,
      },
      employer_id:       record.employer_id,
    }
  }
}

/// Decode a JSON array of records.
pub fn parse_records(raw: &str) -> Result<Vec<Subject>, serde_json::Error> {
  let records: Vec<SubjectRecord> = serde_json::from_str(raw)?;
  Ok(records.into_iter().map(Subject::from).collect())
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// A [`SubjectSource`] backed by a JSON export on disk (or stdin for `-`).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
  path: PathBuf,
}

impl JsonFileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  fn read(&self) -> Result<String, InputError> {
    let io_err = |source: std::io::Error| InputError::Io {
      path: self.path.clone(),
      source,
    };

    if self.path.as_os_str() == STDIN_PATH {
      let mut raw = String::new();
      std::io::stdin().read_to_string(&mut raw).map_err(io_err)?;
      Ok(raw)
    } else {
      std::fs::read_to_string(&self.path).map_err(io_err)
    }
  }
}

impl SubjectSource for JsonFileSource {
  type Error = InputError;

  fn load(&self) -> Result<Vec<Subject>, Self::Error> {
    let raw = self.read()?;
    parse_records(&raw).map_err(|source| InputError::Json {
      path: self.path.clone(),
      source,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_and_sparse_records() {
    let raw = r#"[
      {
        "id": "6f1c2a4e-0000-4000-8000-000000000001",
        "name_en": "Sara Haddad",
        "status": "active",
        "id_card_expiry_date": "2027-02-01",
        "passport_expiry_date": null,
        "employer_id": "c0ffee",
        "created_at": "2024-01-01T00:00:00Z"
      },
      { "id": "6f1c2a4e-0000-4000-8000-000000000002" }
    ]"#;

    let subjects = parse_records(raw).unwrap();
    assert_eq!(subjects.len(), 2);

    let sara = &subjects[0];
    assert_eq!(sara.display_name.as_deref(), Some("Sara Haddad"));
    assert_eq!(sara.lifecycle, LifecycleState::Active);
    assert_eq!(sara.id_document.expiry_date.as_deref(), Some("2027-02-01"));
    assert_eq!(sara.passport_document.expiry_date, None);
    assert!(sara.is_assigned());

    let sparse = &subjects[1];
    assert_eq!(sparse.lifecycle, LifecycleState::Unset);
    assert!(!sparse.is_assigned());
  }

  #[test]
  fn rejects_non_array_payload() {
    assert!(parse_records(r#"{"id": "x"}"#).is_err());
  }

  #[test]
  fn missing_file_reports_path() {
    let source = JsonFileSource::new("/nonexistent/roster/members.json");
    let err = source.load().unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/roster/members.json"));
  }
}
