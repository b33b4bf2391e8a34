// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors surfaced to callers of the storefront operations.
///
/// Variants carry no backend detail: whatever went wrong inside a
/// data client is logged where it happens and replaced by a generic message.
#[derive(Debug, Error)]
pub enum VetError {
  #[error("Authentication required")]
  Unauthenticated,

  /// Returned both when the order does not exist and when it belongs to
  /// someone else.
  #[error("Order not found")]
  OrderNotFound,

  #[error("Invalid email or password")]
  InvalidCredentials,

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Unable to {0} right now, please try again later")]
  Unavailable(&'static str),
}

/// Failures reported by an `AuthClient` or `DataClient` implementation.
#[derive(Debug, Error)]
pub enum BackendError {
  #[error("Backend query failed: {source}")]
  Query {
    #[source]
    source: AnyhowError,
  },

  #[error("Unexpected value in column '{column}': {value}")]
  Decode { column: &'static str, value: String },

  #[error("Backend unavailable: {0}")]
  Unavailable(String),

  #[error("Credentials rejected")]
  InvalidCredentials,
}

impl BackendError {
  pub fn query(err: impl Into<AnyhowError>) -> Self {
    BackendError::Query { source: err.into() }
  }
}

impl From<AnyhowError> for BackendError {
  fn from(err: AnyhowError) -> Self {
    BackendError::Query { source: err }
  }
}

pub type VetResult<T, E = VetError> = std::result::Result<T, E>;
pub type BackendResult<T> = std::result::Result<T, BackendError>;
