//! Async HTTP client wrapping the roster JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, StatusCode};
use roster_core::{Contact, ContactId, ContactPatch, NewContact};

/// Async HTTP client for the roster JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET /api/contacts`
  pub async fn list(&self) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/contacts"))
      .send()
      .await
      .context("GET /contacts failed")?;
    json_or_error(resp).await
  }

  /// `GET /api/contacts/:id` — `None` on 404.
  pub async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let resp = self
      .client
      .get(self.url(&format!("/contacts/{id}")))
      .send()
      .await
      .with_context(|| format!("GET /contacts/{id} failed"))?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    json_or_error(resp).await.map(Some)
  }

  /// `POST /api/contacts`
  pub async fn create(&self, input: &NewContact) -> Result<Contact> {
    let resp = self
      .client
      .post(self.url("/contacts"))
      .json(input)
      .send()
      .await
      .context("POST /contacts failed")?;
    json_or_error(resp).await
  }

  /// `PATCH /api/contacts/:id`
  pub async fn update(&self, id: ContactId, patch: &ContactPatch) -> Result<Contact> {
    let resp = self
      .client
      .patch(self.url(&format!("/contacts/{id}")))
      .json(patch)
      .send()
      .await
      .with_context(|| format!("PATCH /contacts/{id} failed"))?;
    json_or_error(resp).await
  }

  /// `DELETE /api/contacts/:id`
  pub async fn remove(&self, id: ContactId) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/contacts/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /contacts/{id} failed"))?;

    if resp.status().is_success() {
      Ok(())
    } else {
      Err(server_error(resp).await)
    }
  }
}

async fn json_or_error<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
  if !resp.status().is_success() {
    return Err(server_error(resp).await);
  }
  resp.json().await.context("deserialising response")
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn server_error(resp: Response) -> anyhow::Error {
  let status = resp.status();
  let body: serde_json::Value = resp.json().await.unwrap_or_default();
  match body.get("error").and_then(|e| e.as_str()) {
    Some(message) => anyhow!("{message} ({status})"),
    None => anyhow!("request failed: {status}"),
  }
}
