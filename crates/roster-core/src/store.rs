//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The
//! registry depends on this abstraction, never on a concrete backend.

use std::future::Future;

use thiserror::Error;

use crate::{
  contact::{Contact, ContactId},
  validate::ValidatedContact,
};

/// Outcome of a failed write.
///
/// Backends must report violations of the `number`/`email` uniqueness
/// constraints as [`WriteError::UniqueViolation`] and everything else as
/// [`WriteError::Store`].
#[derive(Debug, Error)]
pub enum WriteError<E> {
  #[error("unique constraint violated")]
  UniqueViolation,

  #[error(transparent)]
  Store(#[from] E),
}

/// Abstraction over a relational contacts backend.
///
/// Uniqueness of `number` and `email` must be enforced atomically by the
/// backend, so that two concurrent writes of the same value cannot both
/// succeed.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a new row and return it with its assigned id and timestamps.
  fn insert_contact(
    &self,
    input: ValidatedContact,
  ) -> impl Future<Output = Result<Contact, WriteError<Self::Error>>> + Send + '_;

  /// Every row, in the backend's natural scan order.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a row by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Replace every mutable column of row `id`.
  ///
  /// Returns `None` if no such row exists. Colliding only with the row's own
  /// current values is not a violation.
  fn update_contact(
    &self,
    id: ContactId,
    input: ValidatedContact,
  ) -> impl Future<Output = Result<Option<Contact>, WriteError<Self::Error>>> + Send + '_;

  /// Permanently delete row `id`. Returns `false` if no such row existed.
  fn delete_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
