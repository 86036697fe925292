//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide raw CRUD + count access to the `notes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Text is written exactly as given; validation belongs to the service.
//! - `list_notes` order is `timestamp DESC, id DESC`.
//! - Updates never touch `id` or `timestamp`.
//! - Deleting a missing id is not an error.

use crate::db::DbError;
use crate::model::note::{Note, NoteId, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    note,
    timestamp
FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note storage.
pub trait NoteRepository {
    /// Inserts one note and returns its storage-assigned id.
    fn create_note(&self, text: &str) -> RepoResult<NoteId>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Lists every note, newest first.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Returns the number of stored notes.
    fn count_notes(&self) -> RepoResult<u64>;
    /// Replaces note text and returns the number of matched rows.
    fn update_note_text(&self, id: NoteId, text: &str) -> RepoResult<usize>;
    /// Removes one note; returns the number of removed rows.
    fn delete_note(&self, id: NoteId) -> RepoResult<usize>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, text: &str) -> RepoResult<NoteId> {
        self.conn
            .execute("INSERT INTO notes (note) VALUES (?1);", [text])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY timestamp DESC, id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();

        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn update_note_text(&self, id: NoteId, text: &str) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET note = ?2
             WHERE id = ?1;",
            params![id, text],
        )?;
        Ok(changed)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: NoteId = row.get("id")?;
    let created_at: String = row.get("timestamp")?;
    if NaiveDateTime::parse_from_str(created_at.as_str(), TIMESTAMP_FORMAT).is_err() {
        return Err(RepoError::InvalidData(format!(
            "invalid timestamp `{created_at}` in notes.timestamp for id {id}"
        )));
    }

    Ok(Note {
        id,
        text: row.get("note")?,
        created_at,
    })
}
