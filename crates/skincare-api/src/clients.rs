//! Handlers for `/clients` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/clients/` | Every client with its notes |
//! | `POST`   | `/clients/create` | Body: `{"product", "ingredients", "date", "skinType"}` |
//! | `GET`    | `/clients/:id` | 404 if not found |
//! | `PUT`    | `/clients/:id` | Body: `{"product"}`; empty product is a no-op, otherwise at least two characters |
//! | `DELETE` | `/clients/:id` | Also deletes the client's notes |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use skincare_core::{
  client::{ClientDraft, ClientUpdate, ClientView},
  store::CatalogStore,
};

use crate::{
  ApiState,
  error::ApiError,
  extract::{JsonBody, PathParam},
  render,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /clients/`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<ClientView>>, ApiError>
where
  S: CatalogStore,
{
  let clients = state.store.list_clients().await.map_err(ApiError::store)?;
  let uploads = state.uploads.clone();
  let views: Vec<ClientView> =
    render(move || clients.iter().map(|c| c.read(&uploads)).collect()).await?;
  Ok(Json(views))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /clients/create` — validates `product`, then persists.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  JsonBody(body): JsonBody<ClientDraft>,
) -> Result<Json<ClientView>, ApiError>
where
  S: CatalogStore,
{
  let input = body.validate()?;
  let product = input.product.clone();

  let client = state
    .store
    .create_client(input)
    .await
    .map_err(ApiError::store)
    .map_err(|e| {
      e.conflict_message(|| {
        format!("Processed {product}, either a format error or {product} is a duplicate")
      })
    })?;

  tracing::info!(id = client.id, product = %client.product, "client created");
  let uploads = state.uploads.clone();
  Ok(Json(render(move || client.read(&uploads)).await?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /clients/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<Json<ClientView>, ApiError>
where
  S: CatalogStore,
{
  let client = state
    .store
    .get_client(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;
  let uploads = state.uploads.clone();
  Ok(Json(render(move || client.read(&uploads)).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /clients/:id` — body: `{"product":"..."}`.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
  JsonBody(body): JsonBody<ClientUpdate>,
) -> Result<Json<ClientView>, ApiError>
where
  S: CatalogStore,
{
  body.validate()?;
  let client = state
    .store
    .update_client(id, body)
    .await
    .map_err(ApiError::store)
    .map_err(|e| e.conflict_message(|| "product already exists".to_owned()))?
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;
  let uploads = state.uploads.clone();
  Ok(Json(render(move || client.read(&uploads)).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /clients/:id`
pub async fn remove<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  if state.store.delete_client(id).await.map_err(ApiError::store)? {
    tracing::info!(id, "client deleted");
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("client {id} not found")))
  }
}
