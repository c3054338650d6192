//! The `SubjectSource` trait.
//!
//! Fetching and paging records is the data layer's job. Higher layers depend
//! on this abstraction, not on any concrete backend; `roster-cli` implements
//! it over a JSON export.

use crate::subject::Subject;

/// Abstraction over whatever supplies the current batch of subjects.
///
/// A source returns a fresh, fully materialised batch on every call. Nothing
/// is cached or written back.
pub trait SubjectSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load every subject currently known to the source.
  fn load(&self) -> Result<Vec<Subject>, Self::Error>;
}

impl SubjectSource for Vec<Subject> {
  type Error = std::convert::Infallible;

  fn load(&self) -> Result<Vec<Subject>, Self::Error> { Ok(self.clone()) }
}
