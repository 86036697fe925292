//! Note use-case service.
//!
//! # Responsibility
//! - Provide the six note use-cases on top of a `NoteRepository`.
//! - Reject the empty string on create and update.
//! - Turn missing rows on lookup into a recoverable `NotFound`.
//!
//! # Invariants
//! - Text that fails validation never reaches storage.
//! - `update_note` reports zero matched rows as `Ok(0)`, not as an error.
//! - `delete_note` is idempotent.
//! - Log events carry ids and lengths only, never note text.

use crate::model::note::{validate_note_text, Note, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Input text was rejected before reaching storage.
    Validation(NoteValidationError),
    /// No note exists for the requested id.
    NotFound(NoteId),
    /// Storage was unreachable, corrupted, or the write failed.
    Storage(RepoError),
}

impl NoteServiceError {
    /// Short message suitable for a transient UI notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(NoteValidationError::EmptyText) => "Enter note!".to_string(),
            Self::NotFound(_) => "Note no longer exists".to_string(),
            Self::Storage(err) => format!("Failed to access notes storage: {err}"),
        }
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts one note, returning its new id.
    pub fn create_note(&self, text: &str) -> NoteServiceResult<NoteId> {
        validate_note_text(text)?;
        let id = self
            .repo
            .create_note(text)
            .map_err(|err| storage_failure("note_create", err))?;
        info!(
            "event=note_create module=service status=ok note_id={} text_len={}",
            id,
            text.chars().count()
        );
        Ok(id)
    }

    /// Gets one note, failing with `NotFound` when absent.
    pub fn get_note(&self, id: NoteId) -> NoteServiceResult<Note> {
        self.repo
            .get_note(id)
            .map_err(|err| storage_failure("note_get", err))?
            .ok_or(NoteServiceError::NotFound(id))
    }

    /// Lists all notes, newest first.
    pub fn list_notes(&self) -> NoteServiceResult<Vec<Note>> {
        let notes = self
            .repo
            .list_notes()
            .map_err(|err| storage_failure("note_list", err))?;
        debug!(
            "event=note_list module=service status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    /// Returns the number of stored notes.
    pub fn count_notes(&self) -> NoteServiceResult<u64> {
        self.repo
            .count_notes()
            .map_err(|err| storage_failure("note_count", err))
    }

    /// Replaces note text; returns matched rows (0 when `id` is unknown).
    pub fn update_note(&self, id: NoteId, text: &str) -> NoteServiceResult<usize> {
        validate_note_text(text)?;
        let changed = self
            .repo
            .update_note_text(id, text)
            .map_err(|err| storage_failure("note_update", err))?;
        info!(
            "event=note_update module=service status=ok note_id={} affected={} text_len={}",
            id,
            changed,
            text.chars().count()
        );
        Ok(changed)
    }

    /// Deletes one note. Missing ids are ignored.
    pub fn delete_note(&self, id: NoteId) -> NoteServiceResult<()> {
        let removed = self
            .repo
            .delete_note(id)
            .map_err(|err| storage_failure("note_delete", err))?;
        info!(
            "event=note_delete module=service status=ok note_id={} removed={}",
            id, removed
        );
        Ok(())
    }
}

fn storage_failure(event: &'static str, err: RepoError) -> NoteServiceError {
    error!("event={event} module=service status=error error={err}");
    NoteServiceError::Storage(err)
}
