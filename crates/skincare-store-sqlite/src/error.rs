//! Error type for `skincare-store-sqlite`.

use rusqlite::ffi;
use skincare_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A UNIQUE, NOT NULL, or CHECK constraint rejected the write.
  #[error("constraint violated: {0}")]
  Conflict(String),

  #[error("{kind} {id} does not exist")]
  ParentNotFound { kind: &'static str, id: i64 },
}

impl Error {
  /// Classify a failed call, turning constraint violations into
  /// [`Error::Conflict`].
  pub(crate) fn classify(err: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, msg)) = &err
      && e.code == rusqlite::ErrorCode::ConstraintViolation
      && e.extended_code != ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    {
      return Error::Conflict(msg.clone().unwrap_or_else(|| e.to_string()));
    }
    Error::Database(err)
  }
}

impl StoreError for Error {
  fn is_conflict(&self) -> bool { matches!(self, Self::Conflict(_)) }

  fn is_parent_missing(&self) -> bool { matches!(self, Self::ParentNotFound { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
