//! Core domain logic for QuickNote.
//! This crate is the single owner of the local notes table.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use db::UpgradePolicy;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{preview_line, validate_note_text, Note, NoteId, NoteValidationError};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use store::{NoteStore, StoreConfig};
pub use view::note_list::{NoteListView, ViewError, ViewResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
