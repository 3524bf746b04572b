//! Sample data for a fresh catalog.
//!
//! Seeding is best-effort: a record that collides with an existing one is
//! logged and skipped, and the run continues with the next record.

use rand_core::RngCore;
use serde::Serialize;

use crate::{
  client::NewClient,
  note::NoteContent,
  skin_type::NewSkinType,
  store::{CatalogStore, StoreError as _},
};

/// Placeholder image attached to every seeded note.
pub const SEED_IMAGE: &str = "ncs_logo.png";

const SEED_DATE: &str = "2023";

/// Outcome of a [`seed`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
  pub clients_created:    usize,
  pub skin_types_created: usize,
  pub notes_created:      usize,
  /// Records skipped because they already exist.
  pub conflicts:          usize,
}

struct ClientSeed {
  product:     &'static str,
  skin_type:   &'static str,
  ingredients: &'static str,
}

struct SkinTypeSeed {
  skin_type:     &'static str,
  moisturizer:   &'static str,
  face_cleanser: &'static str,
  serum:         &'static str,
  sunscreen:     &'static str,
}

const CLIENTS: &[ClientSeed] = &[
  ClientSeed {
    product:     "Cetaphil Gentle Skin Cleanser",
    skin_type:   "dry",
    ingredients: "Water, Glycerin, Cocamidopropyl Betaine, Disodium Laureth Sulfosuccinate, \
                  Sodium Cocoamphoacetate, Panthenol, Niacinamide, Pantolactone, \
                  Acrylates/C10-30 Alkyl Acrylate Crosspolymer, Sodium Benzoate, Masking \
                  Fragrance, Sodium Chloride, Citric Acid",
  },
  ClientSeed {
    product:     "Alaffia Everyday Coconut Face Toner",
    skin_type:   "dry",
    ingredients: "Azadirachta indica (neem) leaf aqueous extract, Carica Papaya (Papaya) Leaf \
                  Aqueous Extract, Cocos Nucifera (Coconut) Water, Glycerin, Lavandula Hybrida \
                  (Lavender) Oil, Phenoxyethanol, Potassium Sorbate, Ascorbic Acid, Cocos \
                  Nucifera (Coconut) Extract",
  },
  ClientSeed {
    product:     "Laurel Skin Deep Clarity Oil Cleanser",
    skin_type:   "combination",
    ingredients: "Safflower Seed Oil, Sunflower Seed Oil, Sesame Seed Oil, Tamanu Oil, Black \
                  Cumin Seed Oil, Whole Plant Extracts of Rosemary, Calendula, Turmeric, \
                  Essential Oils of Green Mandarin, Ylang Ylang, Neroli, Rosemary",
  },
  ClientSeed {
    product:     "Glow Recipe Avocado Ceramide Redness Relief Serum",
    skin_type:   "combination",
    ingredients: "Water/Aqua/Eau, Glycerin, Jojoba Esters, Persea Gratissima (Avocado) Oil, \
                  Persea Gratissima (Avocado) Fruit Extract, Niacinamide, Ceramide NP, Ceramide \
                  NS, Ceramide AP, Ceramide EOP, Ceramide EOS, Hydrolyzed Rice Protein, \
                  Allantoin, Oryza Sativa (Rice) Bran Oil, Bisabolol, Zingiber Officinale \
                  (Ginger) Root Extract, Curcuma Longa (Turmeric) Root Extract, Tocopherol, \
                  Palmitoyl Tripeptide-8, Vitis Vinifera (Grape) Fruit Extract, Potassium \
                  Palmitoyl Hydrolyzed Wheat Protein, Boswellia Serrata Extract, Populus \
                  Tremuloides Bark Extract, Caprylic/Capric Triglyceride, Sodium Phytate, Cetyl \
                  Alcohol, Melia Azadirachta Flower Extract, Melia Azadirachta Leaf Extract, \
                  Ocimum Sanctum Leaf Extract, Behenic Acid, Cholesterol, Ethylhexylglycerin, \
                  Ocimum Basilicum (Basil) Flower/Leaf Extract, Elettaria Cardamomum Seed \
                  Extract, Jasminum Officinale (Jasmine) Flower/Leaf Extract, Corallina \
                  Officinalis Extract, Sodium Carbonate, Sodium Chloride, Chlorophyllin-Copper \
                  Complex (CI 75810), Camellia Sinensis Leaf Extract, Cananga Odorata Flower \
                  Extract, Caprooyl Phytosphingosine, Caprooyl Sphingosine, Cucumis Melo (Melon) \
                  Fruit Extract, Cucumis Sativus (Cucumber) Fruit Extract, Pyrus Malus (Apple) \
                  Fruit Extract, Rose Extract, Rubus Idaeus (Raspberry) Leaf Extract, Ascorbyl \
                  Palmitate, Dextran, Hydroxyacetophenone, Xanthan Gum, Butylene Glycol, \
                  Carbomer, Cetearyl Olivate, Sorbitan Olivate, 1,2-Hexanediol, Caprylyl Glycol, \
                  Hydrogenated Vegetable Oil, Lavandula Angustifolia (Lavender) Flower/Leaf/Stem \
                  Extract, Santalum Album (Sandalwood) Wood Extract, Tocopheryl Acetate, \
                  Ceteareth-25, Sodium Hydroxide, Phenoxyethanol, Sodium Benzoate",
  },
  ClientSeed {
    product:     "Paula\u{2019}s Choice Pore-Reducing Toner",
    skin_type:   "oily",
    ingredients: "Water, Glycerin, Butylene Glycol, Niacinamide, Adenosine Triphosphate, Anthemis \
                  Nobilis (Chamomile) Flower Extract (anti-irritant), Arctium Lappa (Burdock) \
                  Root Extract, Hydrolyzed Jojoba Esters, Hydrolyzed Vegetable Protein, Sodium \
                  PCA, Panthenol, Sodium Hyaluronate, Sodium Chondroitin Sulfate, Ceramide 3, \
                  Ceramide 6 II, Ceramide 1, Phytosphingosine, Cholesterol, Tetrahexyldecyl \
                  Ascorbate, Oleth-10, DEA-Oleth-10 Phosphate, Sodium Lauroyl Lactylate, \
                  Polysorbate-20, Caprylyl Glycol, Hexylene Glycol, Sodium Citrate, Xanthan Gum, \
                  Trisodium EDTA, Phenoxyethanol",
  },
  ClientSeed {
    product:     "Drunk Elephant Beste No. 9 Jelly Cleanser",
    skin_type:   "oily",
    ingredients: "Water/Aqua/Eau, Glycerin, Cocamidopropyl Betaine, Coco-Glucoside, Sodium \
                  Lauroyl Methyl Isethionate, Cocamidopropyl Hydroxysultaine, Sodium Methyl \
                  Oleoyl Taurate, Propanediol, Aloe Barbadensis Leaf Extract, Glycolipids, \
                  Linoleic Acid, Linolenic Acid, Lauryl Glucoside, Cucumis Melo Cantalupensis \
                  Fruit Extract, Sclerocarya Birrea Seed Oil, Dipotassium Glycyrrhizate, \
                  Tocopherol, Citric Acid, Phenoxyethanol, Sodium Hydroxide, Sodium Benzoate, \
                  Sodium Chloride, Polylysine",
  },
];

const SKIN_TYPES: &[SkinTypeSeed] = &[
  SkinTypeSeed {
    skin_type:     "oily",
    moisturizer:   "SkinCeuticals Daily Moisture",
    face_cleanser: "CeraVe Acne Foaming Cream Cleanser",
    serum:         "The Ordinary Niacinamide 10% + Zinc 1% Serum",
    sunscreen:     "Regaliz Truderma Sunscreen Gel SPF 50",
  },
  SkinTypeSeed {
    skin_type:     "dry",
    moisturizer:   "Neutrogena Hydro Boost Gel Moisturizer",
    face_cleanser: "Paula's Choice Perfectly Balanced Foaming Cleanser",
    serum:         "Simple Booster Serum - 3% Hyaluronic Acid",
    sunscreen:     "Laneige Watery Sun Cream",
  },
  SkinTypeSeed {
    skin_type:     "sensitive",
    moisturizer:   "Plum Hello Aloe Caring Day Moisturizer",
    face_cleanser: "Bioderma Sensibio Gentle Soothing Micellar Cleansing Foaming Gel",
    serum:         "Simple Booster Serum - 10% Niacinamide",
    sunscreen:     "Elta MD Skin Care UV Glow SPF 36",
  },
  SkinTypeSeed {
    skin_type:     "normal",
    moisturizer:   "Good Vibes Gel Moisturizer",
    face_cleanser: "La Roche-Posay Toleriane Hydrating Gentle Cleanser",
    serum:         "Jovees Herbal Vitamin C Face Serum",
    sunscreen:     "Cetaphil Daily Oil Free Facial Moisturizer with SPF 35",
  },
];

/// Number of seeded clients.
pub const CLIENT_COUNT: usize = CLIENTS.len();

/// Number of seeded skin types.
pub const SKIN_TYPE_COUNT: usize = SKIN_TYPES.len();

/// Between one and three placeholder notes for `name`.
fn placeholder_notes(name: &str, rng: &mut impl RngCore) -> Vec<NoteContent> {
  let count = 1 + (rng.next_u32() % 3) as usize;
  (0..count)
    .map(|n| {
      NoteContent::new(format!("#### {name} note {n}. \n Generated by test data."))
        .with_image(SEED_IMAGE)
    })
    .collect()
}

/// Populate `store` with the sample clients and skin types.
///
/// Conflicting records are counted in [`SeedReport::conflicts`]; any other
/// store error aborts the run.
pub async fn seed<S, R>(store: &S, rng: &mut R) -> Result<SeedReport, S::Error>
where
  S: CatalogStore,
  R: RngCore,
{
  let mut report = SeedReport::default();

  for c in CLIENTS {
    let mut input = NewClient::new(c.product, c.ingredients, SEED_DATE, c.skin_type);
    input.notes = placeholder_notes(c.product, rng);

    match store.create_client(input).await {
      Ok(client) => {
        report.clients_created += 1;
        report.notes_created += client.notes.len();
      }
      Err(e) if e.is_conflict() => {
        tracing::info!(product = c.product, "records exist, duplicate or malformed; skipping");
        report.conflicts += 1;
      }
      Err(e) => return Err(e),
    }
  }

  for st in SKIN_TYPES {
    let input = NewSkinType {
      skin_type:     st.skin_type.to_owned(),
      moisturizer:   st.moisturizer.to_owned(),
      face_cleanser: st.face_cleanser.to_owned(),
      serum:         st.serum.to_owned(),
      sunscreen:     st.sunscreen.to_owned(),
      notes:         placeholder_notes(st.skin_type, rng),
    };
    let note_count = input.notes.len();

    match store.create_skin_type(input).await {
      Ok(_) => {
        report.skin_types_created += 1;
        report.notes_created += note_count;
      }
      Err(e) if e.is_conflict() => {
        tracing::info!(skin_type = st.skin_type, "records exist, duplicate or malformed; skipping");
        report.conflicts += 1;
      }
      Err(e) => return Err(e),
    }
  }

  tracing::info!(
    clients = report.clients_created,
    skin_types = report.skin_types_created,
    notes = report.notes_created,
    conflicts = report.conflicts,
    "seeding finished"
  );
  Ok(report)
}
