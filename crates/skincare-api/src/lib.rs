//! JSON REST API for the skincare catalog.
//!
//! Exposes an axum [`Router`] backed by any [`skincare_core::store::CatalogStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", skincare_api::api_router(store.clone(), uploads))
//! ```

pub mod clients;
pub mod error;
pub mod extract;
pub mod notes;
pub mod skin_types;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use skincare_core::{note::UploadDir, store::CatalogStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState<S: CatalogStore> {
  pub store:   Arc<S>,
  /// Directory note images are read from when serialising notes.
  pub uploads: Arc<UploadDir>,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, uploads: UploadDir) -> Router<()>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
{
  let state = ApiState { store, uploads: Arc::new(uploads) };

  Router::new()
    // Clients
    .route("/clients", get(clients::list::<S>))
    .route("/clients/", get(clients::list::<S>))
    .route("/clients/create", post(clients::create::<S>))
    .route(
      "/clients/{id}",
      get(clients::get_one::<S>)
        .put(clients::update::<S>)
        .delete(clients::remove::<S>),
    )
    .route(
      "/clients/{id}/notes",
      get(notes::list_for_client::<S>).post(notes::add_to_client::<S>),
    )
    // Skin types
    .route("/skintype", get(skin_types::list::<S>))
    .route("/skintype/", get(skin_types::list::<S>))
    .route("/skintype/create", post(skin_types::create::<S>))
    .route(
      "/skintype/{id}",
      get(skin_types::get_one::<S>)
        .put(skin_types::update::<S>)
        .delete(skin_types::remove::<S>),
    )
    .route(
      "/skintype/{id}/notes",
      get(notes::list_for_skin_type::<S>).post(notes::add_to_skin_type::<S>),
    )
    // Notes
    .route("/notes/{id}", delete(notes::remove::<S>))
    .with_state(state)
}

/// Run a projection that reads note images off the async runtime.
pub(crate) async fn render<T, F>(f: F) -> Result<T, ApiError>
where
  F: FnOnce() -> T + Send + 'static,
  T: Send + 'static,
{
  tokio::task::spawn_blocking(f)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))
}

#[cfg(test)]
mod tests;
