//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note list screen's use-cases to Dart via FRB.
//! - Flatten core errors into envelopes the UI can show directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call goes through one process-wide `NoteStore`.

use log::warn;
use quicknote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Note, NoteServiceError, NoteStore, StoreConfig,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const NOTES_DB_FILE_NAME: &str = "quicknote.sqlite3";
const EMPTY_LIST_MESSAGE: &str = "No notes found.";
static NOTE_STORE: OnceLock<NoteStore> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One list row as rendered by the notes screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub text: String,
    /// Raw storage timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
    /// Short date for the row, e.g. `Feb 21`; empty when unparsable.
    pub display_date: String,
}

impl From<Note> for NoteItem {
    fn from(note: Note) -> Self {
        let display_date = note.display_date();
        Self {
            id: note.id,
            text: note.text,
            created_at: note.created_at,
            display_date,
        }
    }
}

/// Result envelope for create/update/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Note affected by the action, when known.
    pub note_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: i64) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(action: &str, err: &NoteServiceError) -> Self {
        warn!("event=ffi_call module=ffi status=error action={action} error={err}");
        Self {
            ok: false,
            note_id: None,
            message: err.user_message(),
        }
    }
}

/// Result envelope for single-note lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteGetResponse {
    pub ok: bool,
    /// `None` when the note is missing or storage failed.
    pub note: Option<NoteItem>,
    pub message: String,
}

/// Result envelope for the full list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    /// Notes, newest first.
    pub items: Vec<NoteItem>,
    /// Empty-state placeholder text when `items` is empty.
    pub message: String,
}

/// Creates a note from dialog input.
///
/// # FFI contract
/// - Input is stored as given; an empty string fails with `Enter note!`.
/// - Returns the new note id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(text: String) -> NoteActionResponse {
    match note_store().create(&text) {
        Ok(note_id) => NoteActionResponse::success("Note created.", note_id),
        Err(err) => NoteActionResponse::failure("note_create", &err),
    }
}

/// Reads one note for the edit dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(note_id: i64) -> NoteGetResponse {
    match note_store().get_by_id(note_id) {
        Ok(note) => NoteGetResponse {
            ok: true,
            note: Some(note.into()),
            message: String::new(),
        },
        Err(err) => NoteGetResponse {
            ok: false,
            note: None,
            message: err.user_message(),
        },
    }
}

/// Lists every note, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    match note_store().list_all() {
        Ok(notes) => {
            let message = if notes.is_empty() {
                EMPTY_LIST_MESSAGE.to_string()
            } else {
                String::new()
            };
            NotesListResponse {
                ok: true,
                items: notes.into_iter().map(NoteItem::from).collect(),
                message,
            }
        }
        Err(err) => NotesListResponse {
            ok: false,
            items: Vec::new(),
            message: err.user_message(),
        },
    }
}

/// Returns the stored note count, or `-1` when storage is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_count() -> i64 {
    match note_store().count() {
        Ok(count) => i64::try_from(count).unwrap_or(i64::MAX),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error action=notes_count error={err}");
            -1
        }
    }
}

/// Replaces the text of one note.
///
/// # FFI contract
/// - Input is stored as given; an empty string fails with `Enter note!`.
/// - A missing note fails with `Note no longer exists`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(note_id: i64, text: String) -> NoteActionResponse {
    match note_store().update(note_id, &text) {
        Ok(0) => NoteActionResponse::failure("note_update", &NoteServiceError::NotFound(note_id)),
        Ok(_) => NoteActionResponse::success("Note updated.", note_id),
        Err(err) => NoteActionResponse::failure("note_update", &err),
    }
}

/// Deletes one note. Deleting a missing note still reports success.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: i64) -> NoteActionResponse {
    match note_store().delete(note_id) {
        Ok(()) => NoteActionResponse::success("Note deleted.", note_id),
        Err(err) => NoteActionResponse::failure("note_delete", &err),
    }
}

fn note_store() -> &'static NoteStore {
    NOTE_STORE.get_or_init(|| NoteStore::new(StoreConfig::new(resolve_db_path())))
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var("QUICKNOTE_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(NOTES_DB_FILE_NAME)
}
