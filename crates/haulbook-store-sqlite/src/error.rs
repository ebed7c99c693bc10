//! Error type for `haulbook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] haulbook_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to attach a logo before the profile was created.
  #[error("no organization profile exists yet")]
  OrganizationMissing,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
