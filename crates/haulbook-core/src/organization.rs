//! Organization profile — the singleton record describing the operator.
//!
//! At most one profile exists at any time. Saving when a profile already
//! exists updates it in place; it is never duplicated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The operator's profile. `logo_filename` names an image stored on disk by
/// the server; no binary data lives in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
  pub id:            i64,
  pub name:          String,
  pub description:   Option<String>,
  pub logo_filename: Option<String>,
  pub created_at:    DateTime<Utc>,
  /// Refreshed on every mutation of the profile.
  pub updated_at:    DateTime<Utc>,
}

/// Input to [`crate::store::LedgerStore::save_organization`].
///
/// The logo is not part of the upsert — it is attached separately once the
/// uploaded file has been persisted, via
/// [`crate::store::LedgerStore::set_organization_logo`].
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationUpdate {
  pub name:        String,
  #[serde(default)]
  pub description: Option<String>,
}

impl OrganizationUpdate {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("name"));
    }
    Ok(())
  }
}
