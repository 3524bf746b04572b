//! Handlers for `/skintype` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/skintype/` | Optional `?skin_type=oily` filter |
//! | `POST`   | `/skintype/create` | Body: all five fields, each at least two characters |
//! | `GET`    | `/skintype/:id` | 404 if not found |
//! | `PUT`    | `/skintype/:id` | Any subset of the five fields; empty values are ignored |
//! | `DELETE` | `/skintype/:id` | Also deletes the skin type's notes |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
};
use serde::Deserialize;
use skincare_core::{
  skin_type::{SkinTypeDraft, SkinTypeUpdate, SkinTypeView},
  store::CatalogStore,
};

use crate::{
  ApiState,
  error::ApiError,
  extract::{JsonBody, PathParam},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub skin_type: Option<String>,
}

/// `GET /skintype/[?skin_type=<name>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SkinTypeView>>, ApiError>
where
  S: CatalogStore,
{
  let mut skin_types = state.store.list_skin_types().await.map_err(ApiError::store)?;
  if let Some(name) = &params.skin_type {
    skin_types.retain(|st| st.is_skin_type(name));
  }
  Ok(Json(skin_types.iter().map(|st| st.read()).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /skintype/create`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  JsonBody(body): JsonBody<SkinTypeDraft>,
) -> Result<Json<SkinTypeView>, ApiError>
where
  S: CatalogStore,
{
  let input = body.validate()?;
  let name = input.skin_type.clone();

  let skin_type = state
    .store
    .create_skin_type(input)
    .await
    .map_err(ApiError::store)
    .map_err(|e| {
      e.conflict_message(|| {
        format!("Processed {name}, either a format error or skin type {name} is a duplicate")
      })
    })?;

  tracing::info!(id = skin_type.id, skin_type = %skin_type.skin_type, "skin type created");
  Ok(Json(skin_type.read()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /skintype/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<Json<SkinTypeView>, ApiError>
where
  S: CatalogStore,
{
  let skin_type = state
    .store
    .get_skin_type(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("skin type {id} not found")))?;
  Ok(Json(skin_type.read()))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /skintype/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
  JsonBody(body): JsonBody<SkinTypeUpdate>,
) -> Result<Json<SkinTypeView>, ApiError>
where
  S: CatalogStore,
{
  body.validate()?;
  let skin_type = state
    .store
    .update_skin_type(id, body)
    .await
    .map_err(ApiError::store)
    .map_err(|e| e.conflict_message(|| "skin type already exists".to_owned()))?
    .ok_or_else(|| ApiError::NotFound(format!("skin type {id} not found")))?;
  Ok(Json(skin_type.read()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /skintype/:id`
pub async fn remove<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  if state.store.delete_skin_type(id).await.map_err(ApiError::store)? {
    tracing::info!(id, "skin type deleted");
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("skin type {id} not found")))
  }
}
