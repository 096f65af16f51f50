//! Plain-text rendering of contacts for the terminal.

use std::fmt::Write as _;

use roster_core::Contact;

/// One row per contact, columns padded to the widest value.
pub fn table(contacts: &[Contact]) -> String {
  if contacts.is_empty() {
    return "no contacts\n".to_string();
  }

  let width = |f: fn(&Contact) -> usize, header: &str| {
    contacts.iter().map(f).max().unwrap_or(0).max(header.len())
  };
  let id_w     = width(|c| c.id.to_string().len(), "ID");
  let name_w   = width(|c| c.name.chars().count(), "NAME");
  let number_w = width(|c| c.number.chars().count(), "NUMBER");

  let mut out = String::new();
  let _ = writeln!(
    out,
    "{:<id_w$}  {:<name_w$}  {:<number_w$}  EMAIL",
    "ID", "NAME", "NUMBER"
  );
  for c in contacts {
    let _ = writeln!(
      out,
      "{:<id_w$}  {:<name_w$}  {:<number_w$}  {}",
      c.id, c.name, c.number, c.email
    );
  }
  out
}

/// Key/value lines for a single contact.
pub fn detail(c: &Contact) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "id:       {}", c.id);
  let _ = writeln!(out, "name:     {}", c.name);
  let _ = writeln!(out, "number:   {}", c.number);
  let _ = writeln!(out, "email:    {}", c.email);
  if let Some(notes) = &c.notes {
    let _ = writeln!(out, "notes:    {notes}");
  }
  let _ = writeln!(out, "created:  {}", c.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
  let _ = writeln!(out, "updated:  {}", c.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
  out
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;

  fn contact(id: i64, name: &str, number: &str, email: &str) -> Contact {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Contact {
      id,
      name: name.into(),
      number: number.into(),
      email: email.into(),
      notes: None,
      created_at: at,
      updated_at: at,
    }
  }

  #[test]
  fn table_aligns_columns() {
    let out = table(&[
      contact(1, "John Doe", "9999999999", "john@test.com"),
      contact(12, "Al", "+1 555 010 0000", "al@test.com"),
    ]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ID  NAME      NUMBER           EMAIL");
    assert_eq!(lines[1], "1   John Doe  9999999999       john@test.com");
    assert_eq!(lines[2], "12  Al        +1 555 010 0000  al@test.com");
  }

  #[test]
  fn empty_table_says_so() {
    assert_eq!(table(&[]), "no contacts\n");
  }

  #[test]
  fn detail_skips_absent_notes() {
    let out = detail(&contact(3, "Jane", "8888888888", "jane@test.com"));
    assert!(out.contains("email:    jane@test.com"));
    assert!(!out.contains("notes:"));
    assert!(out.contains("created:  2024-05-01 12:00:00 UTC"));
  }
}
