//! Expiry-window policy.
//!
//! How many days ahead a document counts as "expiring soon" is a caller
//! decision and differs per document kind.

use serde::{Deserialize, Serialize};

use crate::document::DocumentKind;

/// Per-kind "expiring soon" windows, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryPolicy {
  pub id_card_days:  u32,
  pub passport_days: u32,
}

impl ExpiryPolicy {
  pub const DEFAULT_ID_CARD_DAYS: u32 = 30;
  pub const DEFAULT_PASSPORT_DAYS: u32 = 60;

  pub fn threshold_for(&self, kind: DocumentKind) -> u32 {
    match kind {
      DocumentKind::IdCard => self.id_card_days,
      DocumentKind::Passport => self.passport_days,
    }
  }
}

impl Default for ExpiryPolicy {
  fn default() -> Self {
    Self {
      id_card_days:  Self::DEFAULT_ID_CARD_DAYS,
      passport_days: Self::DEFAULT_PASSPORT_DAYS,
    }
  }
}
