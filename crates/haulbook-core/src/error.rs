//! Error types for `haulbook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required text field was missing or blank.
  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("waste weight must be a positive number of kilograms, got {0}")]
  NonPositiveWeight(f64),

  #[error("waste weight must be a finite number")]
  NonFiniteWeight,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
