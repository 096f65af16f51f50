//! Roster HTTP server: configuration and application assembly.
//!
//! The binary in `main.rs` only parses flags, initialises tracing and calls
//! into this crate, so the assembled [`Router`] can be tested in-process.

use std::path::{Path, PathBuf};

use axum::{Router, routing::get};
use roster_core::{ContactRegistry, store::ContactStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite database file; `:memory:` for a throwaway store.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
    }
  }
}

impl ServerConfig {
  /// Layer `ROSTER_*` environment variables over the (optional) TOML file at
  /// `path`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Whether the configured store lives only in memory.
  pub fn is_in_memory(&self) -> bool { self.store_path == Path::new(":memory:") }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: `/health` plus the JSON API under `/api`,
/// wrapped in request tracing.
pub fn app<S>(registry: ContactRegistry<S>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", roster_api::api_router(registry))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { "ok" }
