//! SQL schema for the catalog SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS clients (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    product     TEXT NOT NULL UNIQUE,
    ingredients TEXT NOT NULL,
    date        TEXT NOT NULL,
    skin_type   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS skintypes (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    skin_type     TEXT NOT NULL UNIQUE,
    moisturizer   TEXT NOT NULL,
    face_cleanser TEXT NOT NULL,
    serum         TEXT NOT NULL,
    sunscreen     TEXT NOT NULL
);

-- Exactly one parent column is set; deleting the parent deletes the note.
CREATE TABLE IF NOT EXISTS notes (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id    INTEGER REFERENCES clients(id)   ON DELETE CASCADE,
    skin_type_id INTEGER REFERENCES skintypes(id) ON DELETE CASCADE,
    text         TEXT NOT NULL CHECK (length(text) > 0),
    image_path   TEXT,
    CHECK ((client_id IS NULL) != (skin_type_id IS NULL))
);

CREATE INDEX IF NOT EXISTS notes_client_idx    ON notes(client_id);
CREATE INDEX IF NOT EXISTS notes_skin_type_idx ON notes(skin_type_id);

PRAGMA user_version = 1;
";
