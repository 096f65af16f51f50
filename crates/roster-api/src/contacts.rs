//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts |
//! | `POST`   | `/contacts` | Body: [`NewContact`]; returns 201 + stored contact |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `PATCH`  | `/contacts/:id` | Body: [`ContactPatch`]; omitted fields are kept |
//! | `DELETE` | `/contacts/:id` | 204 on success |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  Contact, ContactId, ContactPatch, ContactRegistry, NewContact, store::ContactStore,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(registry): State<ContactRegistry<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  Ok(Json(registry.find_all().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(registry): State<ContactRegistry<S>>,
  Json(body): Json<NewContact>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let contact = registry.create(body).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(registry): State<ContactRegistry<S>>,
  Path(id): Path<ContactId>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let contact = registry
    .find_one(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(roster_core::Error::NotFound.to_string()))?;
  Ok(Json(contact))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /contacts/:id`
pub async fn update<S>(
  State(registry): State<ContactRegistry<S>>,
  Path(id): Path<ContactId>,
  Json(body): Json<ContactPatch>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  Ok(Json(registry.update(id, body).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn remove<S>(
  State(registry): State<ContactRegistry<S>>,
  Path(id): Path<ContactId>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
{
  registry.remove(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
