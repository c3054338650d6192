//! Error types for `roster-core`.
//!
//! Classification, resolution and aggregation are total and never fail.
//! These variants cover parsing of caller-supplied tokens.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown sort key: {0:?}")]
  UnknownSortKey(String),

  #[error("unknown document kind: {0:?}")]
  UnknownDocumentKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
