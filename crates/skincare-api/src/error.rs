//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use skincare_core::{ValidationError, store::StoreError};
use thiserror::Error;

/// An error returned by an API handler. Every variant renders as
/// `{"message": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// Boundary validation failed; nothing was persisted.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The store rejected a write as a duplicate or malformed record.
  #[error("conflict: {0}")]
  Conflict(String),

  /// The request could not be extracted (malformed JSON, wrong field types,
  /// non-numeric id).
  #[error("rejected: {message}")]
  Rejected { status: StatusCode, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store error using [`StoreError`].
  pub fn store<E: StoreError>(e: E) -> Self {
    if e.is_conflict() {
      ApiError::Conflict(e.to_string())
    } else if e.is_parent_missing() {
      ApiError::NotFound(e.to_string())
    } else {
      ApiError::Store(Box::new(e))
    }
  }

  /// Replace the message of a [`ApiError::Conflict`]; other variants pass
  /// through.
  pub fn conflict_message(self, message: impl FnOnce() -> String) -> Self {
    match self {
      ApiError::Conflict(_) => ApiError::Conflict(message()),
      other => other,
    }
  }
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self { ApiError::BadRequest(e.message) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self {
    ApiError::Rejected { status: r.status(), message: r.body_text() }
  }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self {
    ApiError::Rejected { status: r.status(), message: r.body_text() }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Rejected { status, message } => (*status, message.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
      }
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use axum::body::to_bytes;
  use serde_json::Value;

  use super::*;

  async fn render(err: ApiError) -> (StatusCode, Value) {
    let resp = err.into_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn store_failures_hide_their_detail() {
    let err = ApiError::Store(Box::new(std::io::Error::other("disk I/O error at page 7")));
    let (status, body) = render(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "internal server error");
  }

  #[tokio::test]
  async fn validation_errors_keep_their_message() {
    let err = ApiError::from(ValidationError::new("serum", "Serum is missing"));
    let (status, body) = render(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Serum is missing");
  }
}
