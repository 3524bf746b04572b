//! HTTP server wiring for the skincare catalog.
//!
//! Mounts the JSON API from [`skincare_api`] under `/api` and adds request
//! tracing. The binary in `main.rs` loads [`ServerConfig`] and calls
//! [`router`].

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use rand_core::OsRng;
use serde::Deserialize;
use skincare_core::{
  note::UploadDir,
  seed::{SeedReport, seed},
  store::CatalogStore,
};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SKINCARE_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Directory note image paths are resolved against.
  pub upload_dir: PathBuf,
  /// Populate the store with sample records on startup.
  pub seed:       bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8086,
      store_path: PathBuf::from("volumes/skincare.db"),
      upload_dir: PathBuf::from("volumes/uploads"),
      seed:       false,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the top-level router: the API nested under `/api`, traced.
pub fn router<S>(store: Arc<S>, uploads: UploadDir) -> Router
where
  S: CatalogStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", skincare_api::api_router(store, uploads))
    .layer(TraceLayer::new_for_http())
}

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Seed `store` with the sample catalog, drawing note counts from the OS RNG.
pub async fn seed_store<S: CatalogStore>(store: &S) -> Result<SeedReport, S::Error> {
  seed(store, &mut OsRng).await
}

// ─── Integration tests ────────────────────────────────────────────────────────
