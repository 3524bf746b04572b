//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `skincare-store-sqlite`).
//! Higher layers (`skincare-api`, the seed routine) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  client::{Client, ClientUpdate, NewClient},
  note::{NewNote, Note, NoteParent},
  skin_type::{NewSkinType, SkinType, SkinTypeUpdate},
};

/// Classification every backend error must support so generic callers can
/// recover from expected write failures.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// A uniqueness or integrity constraint rejected the write. Nothing was
  /// persisted.
  fn is_conflict(&self) -> bool;

  /// A note referenced a parent that does not exist.
  fn is_parent_missing(&self) -> bool;
}

/// Abstraction over a catalog store backend.
///
/// Every write runs in its own transaction and is committed before the
/// future resolves. A failed write leaves no partial state behind.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: StoreError;

  // ── Clients ───────────────────────────────────────────────────────────

  /// Persist a client and its initial notes.
  ///
  /// A duplicate `product` or a missing NOT NULL column yields an error with
  /// [`StoreError::is_conflict`] set.
  fn create_client(
    &self,
    input: NewClient,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  /// Retrieve a client with its notes. Returns `None` if not found.
  fn get_client(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  /// List every client in id order, each with its notes.
  fn list_clients(
    &self,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  /// Apply `update` and commit. Returns `None` if the client does not exist.
  fn update_client(
    &self,
    id: i64,
    update: ClientUpdate,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  /// Delete a client and, by cascade, all of its notes. Returns `false` if
  /// nothing was deleted.
  fn delete_client(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Skin types ────────────────────────────────────────────────────────

  /// Persist a skin type and its initial notes. Duplicate `skin_type` values
  /// are conflicts.
  fn create_skin_type(
    &self,
    input: NewSkinType,
  ) -> impl Future<Output = Result<SkinType, Self::Error>> + Send + '_;

  fn get_skin_type(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<SkinType>, Self::Error>> + Send + '_;

  fn list_skin_types(
    &self,
  ) -> impl Future<Output = Result<Vec<SkinType>, Self::Error>> + Send + '_;

  /// Apply all fields of `update` and commit once.
  fn update_skin_type(
    &self,
    id: i64,
    update: SkinTypeUpdate,
  ) -> impl Future<Output = Result<Option<SkinType>, Self::Error>> + Send + '_;

  fn delete_skin_type(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// Append a note to an existing parent.
  fn add_note(
    &self,
    input: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// Whether `parent` exists, without loading it.
  fn parent_exists(
    &self,
    parent: NoteParent,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Notes attached to `parent`, in id order.
  fn list_notes(
    &self,
    parent: NoteParent,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  fn delete_note(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
