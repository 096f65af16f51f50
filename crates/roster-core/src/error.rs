//! Error types for `roster-core`.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors surfaced by [`crate::ContactRegistry`].
///
/// `Conflict` and `NotFound` are caller mistakes; `Store` wraps anything the
/// backend reported that is not a uniqueness violation and is passed through
/// untouched as the error source.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Email or number already exists")]
  Conflict,

  #[error("Contact not found")]
  NotFound,

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
