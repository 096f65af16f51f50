//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use roster_core::{
  Contact, ContactId, ValidatedContact,
  store::{ContactStore, WriteError},
};

use crate::{
  Error, Result,
  encode::{RawContact, encode_dt},
  schema::{CONTACT_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contacts store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// are serialised on one connection, so each statement (and its `UNIQUE`
/// checks) runs atomically with respect to every other caller.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    debug!("schema initialised");
    Ok(())
  }
}

/// Split a write failure into the uniqueness case and everything else.
fn classify(e: tokio_rusqlite::Error) -> WriteError<Error> {
  let e = Error::from(e);
  if e.is_unique_violation() {
    WriteError::UniqueViolation
  } else {
    WriteError::Store(e)
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn insert_contact(
    &self,
    input: ValidatedContact,
  ) -> Result<Contact, WriteError<Error>> {
    let now_str = encode_dt(Utc::now());
    let name    = input.name().to_owned();
    let number  = input.number().to_owned();
    let email   = input.email().to_owned();
    let notes   = input.notes().map(str::to_owned);

    let raw: RawContact = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO contacts (name, number, email, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING {CONTACT_COLUMNS}"
          ),
          rusqlite::params![name, number, email, notes, now_str],
          RawContact::from_row,
        )?)
      })
      .await
      .map_err(classify)?;

    Ok(raw.into_contact()?)
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
              rusqlite::params![id],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn update_contact(
    &self,
    id: ContactId,
    input: ValidatedContact,
  ) -> Result<Option<Contact>, WriteError<Error>> {
    let now_str = encode_dt(Utc::now());
    let name    = input.name().to_owned();
    let number  = input.number().to_owned();
    let email   = input.email().to_owned();
    let notes   = input.notes().map(str::to_owned);

    // The existence check and the write are one statement: a missing row
    // simply yields no RETURNING row.
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE contacts
                 SET name = ?2, number = ?3, email = ?4, notes = ?5, updated_at = ?6
                 WHERE id = ?1
                 RETURNING {CONTACT_COLUMNS}"
              ),
              rusqlite::params![id, name, number, email, notes, now_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(classify)?;

    Ok(raw.map(RawContact::into_contact).transpose()?)
  }

  async fn delete_contact(&self, id: ContactId) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
