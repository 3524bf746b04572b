//! Clients — skincare product records, each owning a list of notes.

use serde::{Deserialize, Serialize};

use crate::{
  ValidationError,
  error::{check_update_field, overwrite_if_present, require_field},
  note::{Note, NoteContent, NoteView, UploadDir},
};

/// A persisted client (product) together with its notes, ordered by note id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
  pub id:          i64,
  pub product:     String,
  pub ingredients: String,
  pub date:        String,
  pub skin_type:   String,
  pub notes:       Vec<Note>,
}

/// Serialised form of a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientView {
  pub id:          i64,
  pub product:     String,
  pub ingredients: String,
  pub date:        String,
  #[serde(rename = "skinType")]
  pub skin_type:   String,
  pub notes:       Vec<NoteView>,
}

impl Client {
  pub fn read(&self, uploads: &UploadDir) -> ClientView {
    ClientView {
      id:          self.id,
      product:     self.product.clone(),
      ingredients: self.ingredients.clone(),
      date:        self.date.clone(),
      skin_type:   self.skin_type.clone(),
      notes:       self.notes.iter().map(|n| n.read(uploads)).collect(),
    }
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// A create request as received, before boundary validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientDraft {
  pub product:     Option<String>,
  pub ingredients: Option<String>,
  pub date:        Option<String>,
  #[serde(rename = "skinType")]
  pub skin_type:   Option<String>,
  #[serde(default)]
  pub notes:       Vec<NoteContent>,
}

impl ClientDraft {
  /// Check the fields the boundary is responsible for.
  ///
  /// Only `product` is checked here. The remaining columns are NOT NULL in
  /// storage, so omitting them surfaces as a store conflict.
  pub fn validate(self) -> Result<NewClient, ValidationError> {
    let product = require_field("product", "Product", self.product)?;
    for note in &self.notes {
      note.validate()?;
    }
    Ok(NewClient {
      product,
      ingredients: self.ingredients,
      date: self.date,
      skin_type: self.skin_type,
      notes: self.notes,
    })
  }
}

/// Input for [`CatalogStore::create_client`](crate::store::CatalogStore::create_client).
#[derive(Debug, Clone)]
pub struct NewClient {
  pub product:     String,
  pub ingredients: Option<String>,
  pub date:        Option<String>,
  pub skin_type:   Option<String>,
  /// Notes inserted in the same transaction as the client.
  pub notes:       Vec<NoteContent>,
}

impl NewClient {
  pub fn new(
    product: impl Into<String>,
    ingredients: impl Into<String>,
    date: impl Into<String>,
    skin_type: impl Into<String>,
  ) -> Self {
    Self {
      product:     product.into(),
      ingredients: Some(ingredients.into()),
      date:        Some(date.into()),
      skin_type:   Some(skin_type.into()),
      notes:       Vec::new(),
    }
  }

  pub fn with_note(mut self, note: NoteContent) -> Self {
    self.notes.push(note);
    self
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Only `product` is updatable. An empty value leaves it unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientUpdate {
  #[serde(default)]
  pub product: String,
}

impl ClientUpdate {
  pub fn product(product: impl Into<String>) -> Self {
    Self { product: product.into() }
  }

  /// A non-empty product must be at least two characters.
  pub fn validate(&self) -> Result<(), ValidationError> {
    check_update_field("product", "Product", &self.product)
  }

  /// Apply to `client`, returning whether anything changed.
  pub fn apply(&self, client: &mut Client) -> bool {
    overwrite_if_present(&mut client.product, &self.product)
  }
}
