//! Runtime settings, layered from `roster.toml` and `ROSTER_*` variables.
//!
//! ```toml
//! input = "exports/promoters.json"
//!
//! [policy]
//! id_card_days  = 30
//! passport_days = 60
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `ROSTER_POLICY__PASSPORT_DAYS=90`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use roster_core::policy::ExpiryPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
  /// Default JSON export used when `--input` is not given.
  pub input:  Option<PathBuf>,
  #[serde(default)]
  pub policy: ExpiryPolicy,
}

impl Settings {
  /// Read `path` (if it exists) and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ROSTER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absent_file_yields_defaults() {
    let settings =
      Settings::load(Path::new("/nonexistent/roster/roster.toml")).unwrap();
    assert_eq!(settings.policy, ExpiryPolicy::default());
  }
}
