//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::ValidationError;
use serde_json::json;
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error(transparent)]
  Invalid(#[from] ValidationError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    let message = e.to_string();
    match e {
      roster_core::Error::NotFound => ApiError::NotFound(message),
      roster_core::Error::Conflict => ApiError::Conflict(message),
      roster_core::Error::Validation(v) => ApiError::Invalid(v),
      roster_core::Error::Store(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Conflict(m) => {
        (StatusCode::CONFLICT, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Invalid(v) => {
        let details: Vec<String> =
          v.violations.iter().map(ToString::to_string).collect();
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "error": v.to_string(), "details": details })),
        )
          .into_response()
      }
      // Backend details stay in the log.
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
        )
          .into_response()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn store_failure_hides_backend_text() {
    let err = ApiError::from(roster_core::Error::Store(Box::new(
      std::io::Error::other("disk I/O error at /var/lib/roster.db"),
    )));
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(resp).await;
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    assert!(!body.to_string().contains("roster.db"));
  }

  #[tokio::test]
  async fn conflict_keeps_domain_message() {
    let resp = ApiError::from(roster_core::Error::Conflict).into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["error"], "Email or number already exists");
  }
}
