//! Notes — text and image annotations owned by a client or a skin type.
//!
//! A note references its parent by id but never owns it. Deleting the parent
//! deletes its notes. Images live on disk in the upload directory; only the
//! relative path is stored.

use std::{
  fs,
  path::{Component, Path, PathBuf},
};

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, ValidationError};

// ─── Parent reference ────────────────────────────────────────────────────────

/// The entity a note is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NoteParent {
  Client(i64),
  SkinType(i64),
}

impl NoteParent {
  pub fn id(&self) -> i64 {
    match *self {
      Self::Client(id) | Self::SkinType(id) => id,
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Self::Client(_) => "client",
      Self::SkinType(_) => "skin_type",
    }
  }
}

// ─── Note ────────────────────────────────────────────────────────────────────

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  pub id:         i64,
  pub parent:     NoteParent,
  pub text:       String,
  /// Path relative to the configured upload directory.
  pub image_path: Option<String>,
}

/// The body of a note before it has a parent or an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
  pub text:       String,
  #[serde(default, alias = "image", alias = "imagePath")]
  pub image_path: Option<String>,
}

impl NoteContent {
  pub fn new(text: impl Into<String>) -> Self {
    Self { text: text.into(), image_path: None }
  }

  pub fn with_image(mut self, image_path: impl Into<String>) -> Self {
    self.image_path = Some(image_path.into());
    self
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.text.trim().is_empty() {
      return Err(ValidationError::new("text", "Note text is missing"));
    }
    Ok(())
  }
}

/// Input for appending a note to an existing parent.
#[derive(Debug, Clone)]
pub struct NewNote {
  pub parent:  NoteParent,
  pub content: NoteContent,
}

impl NewNote {
  pub fn new(parent: NoteParent, content: NoteContent) -> Self {
    Self { parent, content }
  }
}

/// Serialised form of a note, with the image inlined as base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
  pub id:            i64,
  pub parent_id:     i64,
  pub parent_kind:   String,
  pub text:          String,
  pub image_path:    Option<String>,
  pub base64:        Option<String>,
  /// Set when `image_path` is present but the file could not be read.
  pub image_missing: bool,
}

impl Note {
  /// Project the note for output, encoding its image from `uploads`.
  ///
  /// A missing image never fails the read: the payload is left empty and
  /// `image_missing` is set.
  pub fn read(&self, uploads: &UploadDir) -> NoteView {
    let (base64, image_missing) = match self.image_path.as_deref() {
      None => (None, false),
      Some(path) => match uploads.encode(path) {
        Ok(encoded) => (Some(encoded), false),
        Err(e) => {
          tracing::warn!(note_id = self.id, error = %e, "note image unavailable");
          (None, true)
        }
      },
    };

    NoteView {
      id: self.id,
      parent_id: self.parent.id(),
      parent_kind: self.parent.kind().to_owned(),
      text: self.text.clone(),
      image_path: self.image_path.clone(),
      base64,
      image_missing,
    }
  }
}

// ─── Upload directory ────────────────────────────────────────────────────────

/// The directory note image paths are resolved against.
#[derive(Debug, Clone)]
pub struct UploadDir {
  root: PathBuf,
}

impl UploadDir {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  /// Resolve a stored image path. Only plain relative paths are accepted.
  pub fn resolve(&self, image_path: &str) -> Result<PathBuf> {
    let rel = Path::new(image_path);
    let plain = !image_path.is_empty()
      && rel.components().all(|c| matches!(c, Component::Normal(_)));
    if !plain {
      return Err(Error::UnsafeAssetPath(image_path.to_owned()));
    }
    Ok(self.root.join(rel))
  }

  /// Read the image at `image_path` and return it base64-encoded.
  pub fn encode(&self, image_path: &str) -> Result<String> {
    let path = self.resolve(image_path)?;
    let bytes = fs::read(&path)
      .map_err(|source| Error::MissingAsset { path, source })?;
    Ok(B64.encode(bytes))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn note(image_path: Option<&str>) -> Note {
    Note {
      id:         7,
      parent:     NoteParent::Client(3),
      text:       "#### note".into(),
      image_path: image_path.map(str::to_owned),
    }
  }

  #[test]
  fn read_inlines_existing_image() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("logo.png"), b"png-bytes").unwrap();
    let uploads = UploadDir::new(dir.path());

    let view = note(Some("logo.png")).read(&uploads);
    assert_eq!(view.id, 7);
    assert_eq!(view.parent_id, 3);
    assert_eq!(view.parent_kind, "client");
    assert_eq!(view.base64.as_deref(), Some(B64.encode(b"png-bytes").as_str()));
    assert!(!view.image_missing);
  }

  #[test]
  fn read_flags_missing_image_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadDir::new(dir.path());

    let view = note(Some("absent.png")).read(&uploads);
    assert!(view.base64.is_none());
    assert!(view.image_missing);
    assert_eq!(view.image_path.as_deref(), Some("absent.png"));
  }

  #[test]
  fn read_without_image_is_not_missing() {
    let dir = tempfile::tempdir().unwrap();
    let view = note(None).read(&UploadDir::new(dir.path()));
    assert!(view.base64.is_none());
    assert!(!view.image_missing);
  }

  #[test]
  fn resolve_rejects_escaping_paths() {
    let uploads = UploadDir::new("/srv/uploads");
    assert!(matches!(
      uploads.resolve("../secret.png"),
      Err(Error::UnsafeAssetPath(_))
    ));
    assert!(matches!(
      uploads.resolve("/etc/passwd"),
      Err(Error::UnsafeAssetPath(_))
    ));
    assert!(uploads.resolve("").is_err());
    assert_eq!(
      uploads.resolve("img/a.png").unwrap(),
      PathBuf::from("/srv/uploads/img/a.png")
    );
  }

  #[test]
  fn view_serialises_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let json =
      serde_json::to_value(note(None).read(&UploadDir::new(dir.path()))).unwrap();
    assert_eq!(json["parentId"], 3);
    assert_eq!(json["imageMissing"], false);
    assert!(json["imagePath"].is_null());
  }

  #[test]
  fn blank_text_is_rejected() {
    let err = NoteContent::new("   ").validate().unwrap_err();
    assert_eq!(err.field, "text");
    assert!(NoteContent::new("hello").validate().is_ok());
  }
}
