//! Skin types — reference records mapping a skin type to recommended products.

use serde::{Deserialize, Serialize};

use crate::{
  ValidationError,
  error::{check_update_field, overwrite_if_present, require_field},
  note::NoteContent,
};

/// A persisted skin type recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinType {
  pub id:            i64,
  pub skin_type:     String,
  pub moisturizer:   String,
  pub face_cleanser: String,
  pub serum:         String,
  pub sunscreen:     String,
}

/// Serialised form of a skin type. Notes are exposed separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinTypeView {
  pub id:            i64,
  pub skin_type:     String,
  pub moisturizer:   String,
  pub face_cleanser: String,
  pub serum:         String,
  pub sunscreen:     String,
}

impl SkinType {
  pub fn read(&self) -> SkinTypeView {
    SkinTypeView {
      id:            self.id,
      skin_type:     self.skin_type.clone(),
      moisturizer:   self.moisturizer.clone(),
      face_cleanser: self.face_cleanser.clone(),
      serum:         self.serum.clone(),
      sunscreen:     self.sunscreen.clone(),
    }
  }

  pub fn is_skin_type(&self, skin_type: &str) -> bool { self.skin_type == skin_type }
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// A create request as received, before boundary validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkinTypeDraft {
  pub skin_type:     Option<String>,
  pub moisturizer:   Option<String>,
  pub face_cleanser: Option<String>,
  pub serum:         Option<String>,
  pub sunscreen:     Option<String>,
  #[serde(default)]
  pub notes:         Vec<NoteContent>,
}

impl SkinTypeDraft {
  /// Every field must be present with at least two characters. Fields are
  /// checked in declaration order; the first failure rejects the request.
  pub fn validate(self) -> Result<NewSkinType, ValidationError> {
    let skin_type = require_field("skin_type", "Skin type", self.skin_type)?;
    let moisturizer = require_field("moisturizer", "Moisturizer", self.moisturizer)?;
    let face_cleanser =
      require_field("face_cleanser", "Face cleanser", self.face_cleanser)?;
    let serum = require_field("serum", "Serum", self.serum)?;
    let sunscreen = require_field("sunscreen", "Sunscreen", self.sunscreen)?;
    for note in &self.notes {
      note.validate()?;
    }
    Ok(NewSkinType {
      skin_type,
      moisturizer,
      face_cleanser,
      serum,
      sunscreen,
      notes: self.notes,
    })
  }
}

/// Input for [`CatalogStore::create_skin_type`](crate::store::CatalogStore::create_skin_type).
#[derive(Debug, Clone)]
pub struct NewSkinType {
  pub skin_type:     String,
  pub moisturizer:   String,
  pub face_cleanser: String,
  pub serum:         String,
  pub sunscreen:     String,
  pub notes:         Vec<NoteContent>,
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Each non-empty field overwrites; empty fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkinTypeUpdate {
  pub skin_type:     String,
  pub moisturizer:   String,
  pub face_cleanser: String,
  pub serum:         String,
  pub sunscreen:     String,
}

impl SkinTypeUpdate {
  /// Every non-empty field must be at least two characters.
  pub fn validate(&self) -> Result<(), ValidationError> {
    check_update_field("skin_type", "Skin type", &self.skin_type)?;
    check_update_field("moisturizer", "Moisturizer", &self.moisturizer)?;
    check_update_field("face_cleanser", "Face cleanser", &self.face_cleanser)?;
    check_update_field("serum", "Serum", &self.serum)?;
    check_update_field("sunscreen", "Sunscreen", &self.sunscreen)
  }

  /// Apply every field to `target`, returning whether anything changed.
  pub fn apply(&self, target: &mut SkinType) -> bool {
    let changes = [
      overwrite_if_present(&mut target.skin_type, &self.skin_type),
      overwrite_if_present(&mut target.moisturizer, &self.moisturizer),
      overwrite_if_present(&mut target.face_cleanser, &self.face_cleanser),
      overwrite_if_present(&mut target.serum, &self.serum),
      overwrite_if_present(&mut target.sunscreen, &self.sunscreen),
    ];
    changes.contains(&true)
  }
}
