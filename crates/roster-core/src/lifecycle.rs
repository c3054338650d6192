//! Subject lifecycle state.
//!
//! The data layer stores lifecycle as a free-text token. Known tokens map to
//! closed variants; anything else is preserved in [`LifecycleState::Other`]
//! and treated as eligible for active duty.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// The employment lifecycle of a subject, parsed from its raw status token.
#[derive(
  Debug, Clone, Default, PartialEq, Eq, Hash, EnumString, Serialize,
  Deserialize,
)]
#[serde(from = "Option<String>", into = "Option<String>")]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleState {
  Active,
  Inactive,
  Terminated,
  Resigned,
  OnLeave,
  Suspended,
  /// No token at all, or a blank one.
  #[default]
  #[strum(disabled)]
  Unset,
  /// An unrecognised token, kept verbatim.
  #[strum(default)]
  Other(String),
}

impl LifecycleState {
  /// Parse a raw token. Matching is exact after trimming surrounding
  /// whitespace; `"Terminated"` is an unrecognised token, not `Terminated`.
  pub fn from_token(token: Option<&str>) -> Self {
    match token.map(str::trim) {
      None | Some("") => Self::Unset,
      Some(token) => token
        .parse()
        .unwrap_or_else(|_| Self::Other(token.to_string())),
    }
  }

  /// True for states that override every document condition and force the
  /// overall status to `inactive`. An unset state counts as inactive.
  pub fn is_inactive(&self) -> bool {
    matches!(
      self,
      Self::Unset
        | Self::Inactive
        | Self::Terminated
        | Self::Resigned
        | Self::OnLeave
        | Self::Suspended
    )
  }

  /// The raw token; empty for [`LifecycleState::Unset`].
  pub fn as_str(&self) -> &str {
    match self {
      Self::Active => "active",
      Self::Inactive => "inactive",
      Self::Terminated => "terminated",
      Self::Resigned => "resigned",
      Self::OnLeave => "on_leave",
      Self::Suspended => "suspended",
      Self::Unset => "",
      Self::Other(token) => token,
    }
  }
}

impl fmt::Display for LifecycleState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<Option<String>> for LifecycleState {
  fn from(token: Option<String>) -> Self { Self::from_token(token.as_deref()) }
}

impl From<LifecycleState> for Option<String> {
  fn from(state: LifecycleState) -> Self {
    match state {
      LifecycleState::Unset => None,
      LifecycleState::Other(token) => Some(token),
      known => Some(known.as_str().to_string()),
    }
  }
}
