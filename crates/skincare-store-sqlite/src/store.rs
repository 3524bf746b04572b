//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::{collections::HashMap, path::Path};

use rusqlite::{Connection, OptionalExtension as _, Transaction};

use skincare_core::{
  client::{Client, ClientUpdate, NewClient},
  note::{NewNote, Note, NoteContent, NoteParent},
  skin_type::{NewSkinType, SkinType, SkinTypeUpdate},
  store::CatalogStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A catalog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Count every note row, regardless of parent.
  pub async fn note_count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM notes", [], |r| r.get(0))?))
      .await?;
    Ok(n as usize)
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

/// `(client_id, skin_type_id)` column values for a parent.
fn parent_columns(parent: NoteParent) -> (Option<i64>, Option<i64>) {
  match parent {
    NoteParent::Client(id) => (Some(id), None),
    NoteParent::SkinType(id) => (None, Some(id)),
  }
}

fn parent_row_exists(conn: &Connection, parent: NoteParent) -> rusqlite::Result<bool> {
  let sql = match parent {
    NoteParent::Client(_) => "SELECT 1 FROM clients WHERE id = ?1",
    NoteParent::SkinType(_) => "SELECT 1 FROM skintypes WHERE id = ?1",
  };
  Ok(
    conn
      .query_row(sql, rusqlite::params![parent.id()], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

fn insert_notes(
  tx: &Transaction<'_>,
  parent: NoteParent,
  notes: Vec<NoteContent>,
) -> rusqlite::Result<Vec<Note>> {
  let (client_id, skin_type_id) = parent_columns(parent);
  let mut stmt = tx.prepare(
    "INSERT INTO notes (client_id, skin_type_id, text, image_path) VALUES (?1, ?2, ?3, ?4)",
  )?;

  let mut inserted = Vec::with_capacity(notes.len());
  for content in notes {
    stmt.execute(rusqlite::params![
      client_id,
      skin_type_id,
      content.text,
      content.image_path
    ])?;
    inserted.push(Note {
      id: tx.last_insert_rowid(),
      parent,
      text: content.text,
      image_path: content.image_path,
    });
  }
  Ok(inserted)
}

fn load_notes(conn: &Connection, parent: NoteParent) -> rusqlite::Result<Vec<Note>> {
  let sql = match parent {
    NoteParent::Client(_) => {
      "SELECT id, text, image_path FROM notes WHERE client_id = ?1 ORDER BY id"
    }
    NoteParent::SkinType(_) => {
      "SELECT id, text, image_path FROM notes WHERE skin_type_id = ?1 ORDER BY id"
    }
  };
  let mut stmt = conn.prepare(sql)?;
  stmt
    .query_map(rusqlite::params![parent.id()], |row| {
      Ok(Note {
        id: row.get(0)?,
        parent,
        text: row.get(1)?,
        image_path: row.get(2)?,
      })
    })?
    .collect()
}

fn client_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Client> {
  Ok(Client {
    id:          row.get(0)?,
    product:     row.get(1)?,
    ingredients: row.get(2)?,
    date:        row.get(3)?,
    skin_type:   row.get(4)?,
    notes:       Vec::new(),
  })
}

fn load_client(conn: &Connection, id: i64) -> rusqlite::Result<Option<Client>> {
  let client = conn
    .query_row(
      "SELECT id, product, ingredients, date, skin_type FROM clients WHERE id = ?1",
      rusqlite::params![id],
      client_from_row,
    )
    .optional()?;

  client
    .map(|mut c| {
      c.notes = load_notes(conn, NoteParent::Client(c.id))?;
      Ok(c)
    })
    .transpose()
}

fn skin_type_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SkinType> {
  Ok(SkinType {
    id:            row.get(0)?,
    skin_type:     row.get(1)?,
    moisturizer:   row.get(2)?,
    face_cleanser: row.get(3)?,
    serum:         row.get(4)?,
    sunscreen:     row.get(5)?,
  })
}

fn load_skin_type(conn: &Connection, id: i64) -> rusqlite::Result<Option<SkinType>> {
  conn
    .query_row(
      "SELECT id, skin_type, moisturizer, face_cleanser, serum, sunscreen
       FROM skintypes WHERE id = ?1",
      rusqlite::params![id],
      skin_type_from_row,
    )
    .optional()
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn create_client(&self, input: NewClient) -> Result<Client> {
    let client = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO clients (product, ingredients, date, skin_type) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![input.product, input.ingredients, input.date, input.skin_type],
        )?;
        let id = tx.last_insert_rowid();
        insert_notes(&tx, NoteParent::Client(id), input.notes)?;
        let client = load_client(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;
        Ok(client)
      })
      .await
      .map_err(Error::classify)?;

    tracing::debug!(id = client.id, product = %client.product, "client created");
    Ok(client)
  }

  async fn get_client(&self, id: i64) -> Result<Option<Client>> {
    Ok(self.conn.call(move |conn| Ok(load_client(conn, id)?)).await?)
  }

  async fn list_clients(&self) -> Result<Vec<Client>> {
    let clients = self
      .conn
      .call(|conn| {
        let mut clients = conn
          .prepare("SELECT id, product, ingredients, date, skin_type FROM clients ORDER BY id")?
          .query_map([], client_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut by_parent: HashMap<i64, Vec<Note>> = HashMap::new();
        let mut stmt = conn.prepare(
          "SELECT id, client_id, text, image_path FROM notes
           WHERE client_id IS NOT NULL ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
          let client_id: i64 = row.get(1)?;
          Ok(Note {
            id:         row.get(0)?,
            parent:     NoteParent::Client(client_id),
            text:       row.get(2)?,
            image_path: row.get(3)?,
          })
        })?;
        for note in rows {
          let note = note?;
          by_parent.entry(note.parent.id()).or_default().push(note);
        }

        for client in &mut clients {
          client.notes = by_parent.remove(&client.id).unwrap_or_default();
        }
        Ok(clients)
      })
      .await?;
    Ok(clients)
  }

  async fn update_client(&self, id: i64, update: ClientUpdate) -> Result<Option<Client>> {
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(mut client) = load_client(&tx, id)? else {
          return Ok(None);
        };
        if update.apply(&mut client) {
          tx.execute(
            "UPDATE clients SET product = ?1 WHERE id = ?2",
            rusqlite::params![client.product, id],
          )?;
        }
        tx.commit()?;
        Ok(Some(client))
      })
      .await
      .map_err(Error::classify)?;

    if updated.is_some() {
      tracing::debug!(id, "client updated");
    }
    Ok(updated)
  }

  async fn delete_client(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM clients WHERE id = ?1", rusqlite::params![id])?))
      .await?;
    tracing::debug!(id, removed, "client delete");
    Ok(removed > 0)
  }

  // ── Skin types ────────────────────────────────────────────────────────────

  async fn create_skin_type(&self, input: NewSkinType) -> Result<SkinType> {
    let skin_type = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO skintypes (skin_type, moisturizer, face_cleanser, serum, sunscreen)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            input.skin_type,
            input.moisturizer,
            input.face_cleanser,
            input.serum,
            input.sunscreen,
          ],
        )?;
        let id = tx.last_insert_rowid();
        insert_notes(&tx, NoteParent::SkinType(id), input.notes)?;
        tx.commit()?;
        Ok(SkinType {
          id,
          skin_type: input.skin_type,
          moisturizer: input.moisturizer,
          face_cleanser: input.face_cleanser,
          serum: input.serum,
          sunscreen: input.sunscreen,
        })
      })
      .await
      .map_err(Error::classify)?;

    tracing::debug!(id = skin_type.id, skin_type = %skin_type.skin_type, "skin type created");
    Ok(skin_type)
  }

  async fn get_skin_type(&self, id: i64) -> Result<Option<SkinType>> {
    Ok(self.conn.call(move |conn| Ok(load_skin_type(conn, id)?)).await?)
  }

  async fn list_skin_types(&self) -> Result<Vec<SkinType>> {
    let skin_types = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, skin_type, moisturizer, face_cleanser, serum, sunscreen
           FROM skintypes ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], skin_type_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(skin_types)
  }

  async fn update_skin_type(
    &self,
    id:     i64,
    update: SkinTypeUpdate,
  ) -> Result<Option<SkinType>> {
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(mut st) = load_skin_type(&tx, id)? else {
          return Ok(None);
        };
        if update.apply(&mut st) {
          tx.execute(
            "UPDATE skintypes
             SET skin_type = ?1, moisturizer = ?2, face_cleanser = ?3, serum = ?4, sunscreen = ?5
             WHERE id = ?6",
            rusqlite::params![
              st.skin_type,
              st.moisturizer,
              st.face_cleanser,
              st.serum,
              st.sunscreen,
              id,
            ],
          )?;
        }
        tx.commit()?;
        Ok(Some(st))
      })
      .await
      .map_err(Error::classify)?;

    if updated.is_some() {
      tracing::debug!(id, "skin type updated");
    }
    Ok(updated)
  }

  async fn delete_skin_type(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM skintypes WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    tracing::debug!(id, removed, "skin type delete");
    Ok(removed > 0)
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn add_note(&self, input: NewNote) -> Result<Note> {
    let parent = input.parent;
    let note = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !parent_row_exists(&tx, parent)? {
          return Ok(None);
        }
        let mut notes = insert_notes(&tx, parent, vec![input.content])?;
        tx.commit()?;
        Ok(notes.pop())
      })
      .await
      .map_err(Error::classify)?;

    let note = note.ok_or(Error::ParentNotFound {
      kind: parent.kind(),
      id:   parent.id(),
    })?;
    tracing::debug!(id = note.id, parent = parent.kind(), parent_id = parent.id(), "note added");
    Ok(note)
  }

  async fn parent_exists(&self, parent: NoteParent) -> Result<bool> {
    Ok(self.conn.call(move |conn| Ok(parent_row_exists(conn, parent)?)).await?)
  }

  async fn list_notes(&self, parent: NoteParent) -> Result<Vec<Note>> {
    Ok(self.conn.call(move |conn| Ok(load_notes(conn, parent)?)).await?)
  }

  async fn delete_note(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute("DELETE FROM notes WHERE id = ?1", rusqlite::params![id])?))
      .await?;
    Ok(removed > 0)
  }
}
