//! [`ContactRegistry`] — the service every transport goes through.
//!
//! The registry is stateless: it validates input, calls the store, and turns
//! store outcomes into [`Error`] kinds. Storage failures that are not
//! uniqueness violations are passed through as [`Error::Store`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
  contact::{Contact, ContactId, ContactPatch, NewContact},
  error::{Error, Result},
  store::{ContactStore, WriteError},
  validate::validate,
};

/// Contact CRUD over a shared [`ContactStore`] handle.
pub struct ContactRegistry<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactRegistry<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContactStore> ContactRegistry<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate `input` and insert it as a new contact.
  pub async fn create(&self, input: NewContact) -> Result<Contact> {
    let validated = validate(&input)?;

    let contact = self
      .store
      .insert_contact(validated)
      .await
      .map_err(|e| write_error("create", e))?;

    info!(id = contact.id, "contact created");
    Ok(contact)
  }

  /// Every stored contact, in the store's natural order.
  pub async fn find_all(&self) -> Result<Vec<Contact>> {
    let contacts = self.store.list_contacts().await.map_err(store_error)?;
    debug!(count = contacts.len(), "listed contacts");
    Ok(contacts)
  }

  /// The contact with `id`, or `None`. A missing contact is not an error.
  pub async fn find_one(&self, id: ContactId) -> Result<Option<Contact>> {
    let contact = self.store.get_contact(id).await.map_err(store_error)?;
    debug!(id, found = contact.is_some(), "looked up contact");
    Ok(contact)
  }

  /// Apply `patch` to contact `id` and persist the merged record.
  ///
  /// Fails with [`Error::NotFound`] before any validation if `id` does not
  /// exist.
  pub async fn update(&self, id: ContactId, patch: ContactPatch) -> Result<Contact> {
    let current = self
      .store
      .get_contact(id)
      .await
      .map_err(store_error)?
      .ok_or(Error::NotFound)?;

    let validated = validate(&patch.apply_to(&current))?;

    // A concurrent delete between the lookup and the write shows up as `None`.
    let contact = self
      .store
      .update_contact(id, validated)
      .await
      .map_err(|e| write_error("update", e))?
      .ok_or(Error::NotFound)?;

    info!(id, "contact updated");
    Ok(contact)
  }

  /// Permanently delete contact `id`.
  pub async fn remove(&self, id: ContactId) -> Result<()> {
    self
      .store
      .get_contact(id)
      .await
      .map_err(store_error)?
      .ok_or(Error::NotFound)?;

    if !self.store.delete_contact(id).await.map_err(store_error)? {
      return Err(Error::NotFound);
    }

    info!(id, "contact removed");
    Ok(())
  }
}

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

fn write_error<E>(op: &'static str, e: WriteError<E>) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  match e {
    WriteError::UniqueViolation => {
      warn!(op, "rejected write: email or number already exists");
      Error::Conflict
    }
    WriteError::Store(e) => store_error(e),
  }
}

#[cfg(test)]
mod tests {
  use std::{
    collections::BTreeMap,
    sync::{
      Mutex,
      atomic::{AtomicBool, Ordering},
    },
  };

  use chrono::Utc;
  use thiserror::Error;

  use super::*;
  use crate::validate::ValidatedContact;

  #[derive(Debug, Error)]
  #[error("backend offline")]
  struct Offline;

  #[derive(Default)]
  struct Rows {
    next_id: ContactId,
    rows:    BTreeMap<ContactId, Contact>,
  }

  /// Minimal in-memory backend with the same uniqueness rules as SQLite.
  #[derive(Default)]
  struct MemStore {
    rows:    Mutex<Rows>,
    offline: AtomicBool,
  }

  impl MemStore {
    fn check_online(&self) -> std::result::Result<(), Offline> {
      if self.offline.load(Ordering::SeqCst) { Err(Offline) } else { Ok(()) }
    }

    fn collides(rows: &Rows, skip: Option<ContactId>, v: &ValidatedContact) -> bool {
      rows.rows.values().any(|c| {
        Some(c.id) != skip && (c.number == v.number() || c.email == v.email())
      })
    }
  }

  impl ContactStore for MemStore {
    type Error = Offline;

    async fn insert_contact(
      &self,
      input: ValidatedContact,
    ) -> std::result::Result<Contact, WriteError<Offline>> {
      self.check_online()?;
      let mut rows = self.rows.lock().unwrap();
      if Self::collides(&rows, None, &input) {
        return Err(WriteError::UniqueViolation);
      }
      rows.next_id += 1;
      let now = Utc::now();
      let contact = Contact {
        id:         rows.next_id,
        name:       input.name().to_owned(),
        number:     input.number().to_owned(),
        email:      input.email().to_owned(),
        notes:      input.notes().map(str::to_owned),
        created_at: now,
        updated_at: now,
      };
      rows.rows.insert(contact.id, contact.clone());
      Ok(contact)
    }

    async fn list_contacts(&self) -> std::result::Result<Vec<Contact>, Offline> {
      self.check_online()?;
      Ok(self.rows.lock().unwrap().rows.values().cloned().collect())
    }

    async fn get_contact(
      &self,
      id: ContactId,
    ) -> std::result::Result<Option<Contact>, Offline> {
      self.check_online()?;
      Ok(self.rows.lock().unwrap().rows.get(&id).cloned())
    }

    async fn update_contact(
      &self,
      id: ContactId,
      input: ValidatedContact,
    ) -> std::result::Result<Option<Contact>, WriteError<Offline>> {
      self.check_online()?;
      let mut rows = self.rows.lock().unwrap();
      if !rows.rows.contains_key(&id) {
        return Ok(None);
      }
      if Self::collides(&rows, Some(id), &input) {
        return Err(WriteError::UniqueViolation);
      }
      let Some(row) = rows.rows.get_mut(&id) else {
        return Ok(None);
      };
      row.name = input.name().to_owned();
      row.number = input.number().to_owned();
      row.email = input.email().to_owned();
      row.notes = input.notes().map(str::to_owned);
      row.updated_at = Utc::now();
      Ok(Some(row.clone()))
    }

    async fn delete_contact(&self, id: ContactId) -> std::result::Result<bool, Offline> {
      self.check_online()?;
      Ok(self.rows.lock().unwrap().rows.remove(&id).is_some())
    }
  }

  fn registry() -> ContactRegistry<MemStore> {
    ContactRegistry::new(Arc::new(MemStore::default()))
  }

  fn john() -> NewContact {
    NewContact::new("John Doe", "9999999999", "john@test.com").with_notes("Testing")
  }

  #[tokio::test]
  async fn create_then_find_one_round_trips() {
    let r = registry();
    let created = r.create(john()).await.unwrap();
    assert_eq!(created.name, "John Doe");
    assert_eq!(created.notes.as_deref(), Some("Testing"));

    let fetched = r.find_one(created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
  }

  #[tokio::test]
  async fn create_rejects_invalid_input_before_the_store() {
    let r = registry();
    let err = r
      .create(NewContact::new("", "9999999999", "john@test.com"))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Validation(ref v) if v.has_field("name")));
    assert!(r.find_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn duplicate_email_or_number_is_a_conflict() {
    let r = registry();
    r.create(john()).await.unwrap();

    let same_email = NewContact::new("Other", "2222222222", "john@test.com");
    let err = r.create(same_email).await.unwrap_err();
    assert!(matches!(err, Error::Conflict));
    assert_eq!(err.to_string(), "Email or number already exists");

    let same_number = NewContact::new("Other", "9999999999", "other@test.com");
    assert!(matches!(r.create(same_number).await, Err(Error::Conflict)));
  }

  #[tokio::test]
  async fn find_one_missing_is_none() {
    assert_eq!(registry().find_one(999).await.unwrap(), None);
  }

  #[tokio::test]
  async fn update_missing_is_not_found_even_with_bad_input() {
    let r = registry();
    let patch = ContactPatch {
      email: Some("test@test,com".into()),
      ..Default::default()
    };
    let err = r.update(999, patch).await.unwrap_err();
    assert!(matches!(err, Error::NotFound));
    assert_eq!(err.to_string(), "Contact not found");
  }

  #[tokio::test]
  async fn update_to_own_values_is_not_a_conflict() {
    let r = registry();
    let a = r.create(john()).await.unwrap();
    let updated = r
      .update(a.id, ContactPatch::from(NewContact::new("J. Doe", &a.number, &a.email)))
      .await
      .unwrap();
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.name, "J. Doe");
    assert_eq!(updated.notes, None);
  }

  #[tokio::test]
  async fn update_into_another_rows_number_is_a_conflict() {
    let r = registry();
    let a = r.create(john()).await.unwrap();
    let c = r
      .create(NewContact::new("Carol", "+1 555 010 0000", "carol@test.com"))
      .await
      .unwrap();

    let patch = ContactPatch { number: Some(c.number.clone()), ..Default::default() };
    assert!(matches!(r.update(a.id, patch).await, Err(Error::Conflict)));
    assert_eq!(r.find_one(a.id).await.unwrap(), Some(a));
  }

  #[tokio::test]
  async fn remove_then_remove_again() {
    let r = registry();
    let a = r.create(john()).await.unwrap();

    r.remove(a.id).await.unwrap();
    assert_eq!(r.find_one(a.id).await.unwrap(), None);

    let err = r.remove(a.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound));
  }

  #[tokio::test]
  async fn storage_failures_pass_through_unclassified() {
    let store = Arc::new(MemStore::default());
    let r = ContactRegistry::new(Arc::clone(&store));
    store.offline.store(true, Ordering::SeqCst);

    let err = r.create(john()).await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert_eq!(err.to_string(), "backend offline");
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "backend offline");

    assert!(matches!(r.find_all().await, Err(Error::Store(_))));
    assert!(matches!(r.remove(1).await, Err(Error::Store(_))));
  }
}
