//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by a [`ContactRegistry`] over any
//! [`ContactStore`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(registry.clone()))
//! ```

pub mod contacts;
pub mod error;

use axum::{Router, routing::get};
use roster_core::{ContactRegistry, store::ContactStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(registry: ContactRegistry<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .patch(contacts::update::<S>)
        .delete(contacts::remove::<S>),
    )
    .with_state(registry)
}

// ─── Integration tests ────────────────────────────────────────────────────────
