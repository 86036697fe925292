//! In-memory note list kept in step with a `NoteStore`.
//!
//! # Responsibility
//! - Hold the rows a single-screen UI renders.
//! - Patch the cached rows locally after each successful mutation.
//!
//! # Invariants
//! - The cache is never authoritative: it only changes after storage did.
//! - New notes are inserted at position 0 (newest first).
//! - Positions index the cached order, not note ids.

use crate::model::note::Note;
use crate::service::note_service::NoteServiceError;
use crate::store::NoteStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for list-view actions.
#[derive(Debug)]
pub enum ViewError {
    Service(NoteServiceError),
    PositionOutOfRange { position: usize, len: usize },
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::PositionOutOfRange { position, len } => {
                write!(f, "no note at position {position} (list has {len})")
            }
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::PositionOutOfRange { .. } => None,
        }
    }
}

impl From<NoteServiceError> for ViewError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

pub type ViewResult<T> = Result<T, ViewError>;

/// Cached, render-ready list of notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListView {
    notes: Vec<Note>,
}

impl NoteListView {
    /// Builds a view from a fresh `list_all` query.
    pub fn load(store: &NoteStore) -> ViewResult<Self> {
        Ok(Self {
            notes: store.list_all()?,
        })
    }

    /// Replaces the cache with a fresh `list_all` query.
    pub fn reload(&mut self, store: &NoteStore) -> ViewResult<()> {
        self.notes = store.list_all()?;
        Ok(())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, position: usize) -> Option<&Note> {
        self.notes.get(position)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Whether the "no notes" placeholder should be shown, per storage count.
    pub fn is_empty_placeholder_visible(&self, store: &NoteStore) -> ViewResult<bool> {
        Ok(store.count()? == 0)
    }

    /// Creates a note, reads it back and shows it at the top of the list.
    ///
    /// The insert has already happened when the read-back fails, so the cache
    /// is reloaded before the read error is returned.
    pub fn create(&mut self, store: &NoteStore, text: &str) -> ViewResult<&Note> {
        let id = store.create(text)?;
        let note = match store.get_by_id(id) {
            Ok(note) => note,
            Err(err) => {
                self.reload(store)?;
                return Err(err.into());
            }
        };
        self.notes.insert(0, note);
        Ok(&self.notes[0])
    }

    /// Updates the note at `position` and patches the cached row.
    pub fn update_at(
        &mut self,
        store: &NoteStore,
        position: usize,
        text: &str,
    ) -> ViewResult<&Note> {
        let id = self.checked(position)?.id;
        if store.update(id, text)? == 0 {
            self.notes.remove(position);
            return Err(NoteServiceError::NotFound(id).into());
        }
        self.notes[position].text = text.to_string();
        Ok(&self.notes[position])
    }

    /// Deletes the note at `position` and drops it from the cache.
    pub fn delete_at(&mut self, store: &NoteStore, position: usize) -> ViewResult<Note> {
        let id = self.checked(position)?.id;
        store.delete(id)?;
        Ok(self.notes.remove(position))
    }

    fn checked(&self, position: usize) -> ViewResult<&Note> {
        self.notes.get(position).ok_or(ViewError::PositionOutOfRange {
            position,
            len: self.notes.len(),
        })
    }
}
