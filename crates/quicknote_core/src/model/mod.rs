//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the note record exchanged between storage and presentation.
//!
//! # Invariants
//! - Every note is identified by a storage-assigned `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
