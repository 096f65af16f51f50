//! The contact record and the inputs accepted for creating and updating it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned primary key. Never reused after deletion.
pub type ContactId = i64;

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:         ContactId,
  pub name:       String,
  /// Phone number, unique across all contacts.
  pub number:     String,
  /// Email address, unique across all contacts.
  pub email:      String,
  pub notes:      Option<String>,
  /// Server-assigned on insert; never changes afterwards.
  pub created_at: DateTime<Utc>,
  /// Server-assigned on insert and on every update.
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::ContactRegistry::create`]. The `id` and timestamps are
/// always assigned by the store.
///
/// Missing fields deserialise as empty and are then rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewContact {
  pub name:   String,
  pub number: String,
  pub email:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:  Option<String>,
}

impl NewContact {
  /// Convenience constructor without notes.
  pub fn new(
    name: impl Into<String>,
    number: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      name:   name.into(),
      number: number.into(),
      email:  email.into(),
      notes:  None,
    }
  }

  pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
    self.notes = Some(notes.into());
    self
  }
}

/// Input to [`crate::ContactRegistry::update`].
///
/// Omitted fields keep the contact's current value. The merged record is
/// validated as a whole and written back in full.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:  Option<String>,
  /// An empty string clears the notes.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:  Option<String>,
}

impl ContactPatch {
  /// Overlay the patch on `current`, producing the full replacement record.
  pub fn apply_to(self, current: &Contact) -> NewContact {
    NewContact {
      name:   self.name.unwrap_or_else(|| current.name.clone()),
      number: self.number.unwrap_or_else(|| current.number.clone()),
      email:  self.email.unwrap_or_else(|| current.email.clone()),
      notes:  self.notes.or_else(|| current.notes.clone()),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.number.is_none()
      && self.email.is_none()
      && self.notes.is_none()
  }
}

impl From<NewContact> for ContactPatch {
  fn from(c: NewContact) -> Self {
    Self {
      name:   Some(c.name),
      number: Some(c.number),
      email:  Some(c.email),
      notes:  Some(c.notes.unwrap_or_default()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stored() -> Contact {
    let now = Utc::now();
    Contact {
      id:         7,
      name:       "John Doe".into(),
      number:     "9999999999".into(),
      email:      "john@test.com".into(),
      notes:      Some("met at the conference".into()),
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn patch_keeps_omitted_fields() {
    let patch = ContactPatch {
      email: Some("jd@test.com".into()),
      ..Default::default()
    };
    let merged = patch.apply_to(&stored());
    assert_eq!(merged.name, "John Doe");
    assert_eq!(merged.number, "9999999999");
    assert_eq!(merged.email, "jd@test.com");
    assert_eq!(merged.notes.as_deref(), Some("met at the conference"));
  }

  #[test]
  fn full_patch_replaces_everything() {
    let replacement = NewContact::new("Jane Doe", "8888888888", "jane@test.com");
    let merged = ContactPatch::from(replacement).apply_to(&stored());
    assert_eq!(merged.name, "Jane Doe");
    assert_eq!(merged.number, "8888888888");
    assert_eq!(merged.email, "jane@test.com");
    // No notes in the replacement means the old ones are cleared.
    assert_eq!(merged.notes.as_deref(), Some(""));
  }

  #[test]
  fn patch_deserialises_with_missing_fields() {
    let patch: ContactPatch =
      serde_json::from_str(r#"{"name":"Only Name"}"#).unwrap();
    assert_eq!(patch.name.as_deref(), Some("Only Name"));
    assert!(patch.number.is_none());
    assert!(!patch.is_empty());
    assert!(ContactPatch::default().is_empty());
  }
}
