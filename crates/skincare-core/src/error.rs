//! Error types for `skincare-core`.

use std::path::PathBuf;

use thiserror::Error;

/// Minimum character count for every required string field.
pub const MIN_FIELD_LEN: usize = 2;

/// A request rejected at the boundary, before anything touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
  /// Wire name of the offending field (e.g. `"moisturizer"`).
  pub field:   &'static str,
  pub message: String,
}

impl ValidationError {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("image {path:?} could not be read: {source}")]
  MissingAsset {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("image path {0:?} escapes the upload directory")]
  UnsafeAssetPath(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Require `value` to be present and at least [`MIN_FIELD_LEN`] characters.
///
/// `label` is the human-readable name used in the message.
pub(crate) fn require_field(
  field: &'static str,
  label: &str,
  value: Option<String>,
) -> Result<String, ValidationError> {
  match value {
    Some(v) if v.chars().count() >= MIN_FIELD_LEN => Ok(v),
    _ => Err(ValidationError::new(
      field,
      format!("{label} is missing, or is less than {MIN_FIELD_LEN} characters"),
    )),
  }
}

/// Check an update value: empty is allowed (it leaves the field unchanged),
/// anything else must be at least [`MIN_FIELD_LEN`] characters.
pub(crate) fn check_update_field(
  field: &'static str,
  label: &str,
  value: &str,
) -> Result<(), ValidationError> {
  if value.is_empty() || value.chars().count() >= MIN_FIELD_LEN {
    return Ok(());
  }
  Err(ValidationError::new(
    field,
    format!("{label} is less than {MIN_FIELD_LEN} characters"),
  ))
}

/// Overwrite `slot` with `value` unless `value` is empty. Returns whether the
/// slot changed.
pub(crate) fn overwrite_if_present(slot: &mut String, value: &str) -> bool {
  if value.is_empty() || slot == value {
    return false;
  }
  value.clone_into(slot);
  true
}
