//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use roster_core::{Contact, ContactId};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `contacts` row exactly as read from SQLite, before timestamp decoding.
pub struct RawContact {
  pub id:         ContactId,
  pub name:       String,
  pub number:     String,
  pub email:      String,
  pub notes:      Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawContact {
  /// Map a row selected with [`crate::schema::CONTACT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      number:     row.get(2)?,
      email:      row.get(3)?,
      notes:      row.get(4)?,
      created_at: row.get(5)?,
      updated_at: row.get(6)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         self.id,
      name:       self.name,
      number:     self.number,
      email:      self.email,
      notes:      self.notes,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
