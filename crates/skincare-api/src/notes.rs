//! Handlers for note endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/clients/:id/notes`, `/skintype/:id/notes` | 404 if the parent is missing |
//! | `POST`   | `/clients/:id/notes`, `/skintype/:id/notes` | Body: `{"text", "imagePath"}`; returns 201 |
//! | `DELETE` | `/notes/:id` | |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use skincare_core::{
  note::{NewNote, NoteContent, NoteParent, NoteView},
  store::CatalogStore,
};

use crate::{
  ApiState,
  error::ApiError,
  extract::{JsonBody, PathParam},
  render,
};

async fn list_for<S>(
  state: &ApiState<S>,
  parent: NoteParent,
) -> Result<Json<Vec<NoteView>>, ApiError>
where
  S: CatalogStore,
{
  let exists = state.store.parent_exists(parent).await.map_err(ApiError::store)?;
  if !exists {
    return Err(ApiError::NotFound(format!(
      "{} {} not found",
      parent.kind(),
      parent.id()
    )));
  }

  let notes = state.store.list_notes(parent).await.map_err(ApiError::store)?;
  let uploads = state.uploads.clone();
  let views: Vec<NoteView> =
    render(move || notes.iter().map(|n| n.read(&uploads)).collect()).await?;
  Ok(Json(views))
}

async fn add_to<S>(
  state: &ApiState<S>,
  parent: NoteParent,
  content: NoteContent,
) -> Result<(StatusCode, Json<NoteView>), ApiError>
where
  S: CatalogStore,
{
  content.validate()?;
  let note = state
    .store
    .add_note(NewNote::new(parent, content))
    .await
    .map_err(ApiError::store)?;

  tracing::info!(id = note.id, parent = parent.kind(), parent_id = parent.id(), "note added");
  let uploads = state.uploads.clone();
  let view = render(move || note.read(&uploads)).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /clients/:id/notes`
pub async fn list_for_client<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<NoteView>>, ApiError>
where
  S: CatalogStore,
{
  list_for(&state, NoteParent::Client(id)).await
}

/// `GET /skintype/:id/notes`
pub async fn list_for_skin_type<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<NoteView>>, ApiError>
where
  S: CatalogStore,
{
  list_for(&state, NoteParent::SkinType(id)).await
}

/// `POST /clients/:id/notes`
pub async fn add_to_client<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
  JsonBody(body): JsonBody<NoteContent>,
) -> Result<(StatusCode, Json<NoteView>), ApiError>
where
  S: CatalogStore,
{
  add_to(&state, NoteParent::Client(id), body).await
}

/// `POST /skintype/:id/notes`
pub async fn add_to_skin_type<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
  JsonBody(body): JsonBody<NoteContent>,
) -> Result<(StatusCode, Json<NoteView>), ApiError>
where
  S: CatalogStore,
{
  add_to(&state, NoteParent::SkinType(id), body).await
}

/// `DELETE /notes/:id`
pub async fn remove<S>(
  State(state): State<ApiState<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  if state.store.delete_note(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("note {id} not found")))
  }
}
