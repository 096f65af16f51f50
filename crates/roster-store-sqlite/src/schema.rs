//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete.
CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL CHECK (name <> ''),
    number      TEXT NOT NULL UNIQUE CHECK (number <> ''),
    email       TEXT NOT NULL UNIQUE CHECK (email <> ''),
    notes       TEXT,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";

/// Column list shared by every query that materialises a [`Contact`].
///
/// [`Contact`]: roster_core::Contact
pub const CONTACT_COLUMNS: &str =
  "id, name, number, email, notes, created_at, updated_at";
