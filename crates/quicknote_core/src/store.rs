//! Persistence component owning the local `notes` table.
//!
//! # Responsibility
//! - Expose create / get / list / count / update / delete as the only way
//!   callers reach note storage.
//! - Scope one SQLite connection to each operation.
//! - Serialize callers so a shared store never runs two operations at once.
//!
//! # Invariants
//! - The connection is acquired at the start of every call and dropped before
//!   it returns, on success and error paths alike.
//! - A poisoned lock is recovered; it never turns into a panic for callers.

use crate::db::{open_db_with_policy, UpgradePolicy};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{RepoError, SqliteNoteRepository};
use crate::service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Location and schema policy for a [`NoteStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite file path. Created on first use.
    pub db_path: PathBuf,
    /// What to do when the file carries an older schema version.
    #[serde(default)]
    pub upgrade_policy: UpgradePolicy,
}

impl StoreConfig {
    /// Config for `db_path` with the non-destructive default policy.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            upgrade_policy: UpgradePolicy::default(),
        }
    }

    pub fn with_upgrade_policy(mut self, policy: UpgradePolicy) -> Self {
        self.upgrade_policy = policy;
        self
    }
}

/// File-backed note store; safe to share across threads.
pub struct NoteStore {
    config: StoreConfig,
    op_lock: Mutex<()>,
}

impl NoteStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            op_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn db_path(&self) -> &Path {
        self.config.db_path.as_path()
    }

    /// Inserts a note with the current storage timestamp and returns its id.
    pub fn create(&self, text: &str) -> NoteServiceResult<NoteId> {
        self.with_service(|service| service.create_note(text))
    }

    /// Returns the note for `id`, or `NotFound`.
    pub fn get_by_id(&self, id: NoteId) -> NoteServiceResult<Note> {
        self.with_service(|service| service.get_note(id))
    }

    /// Returns every note, newest first. Empty storage yields an empty vec.
    pub fn list_all(&self) -> NoteServiceResult<Vec<Note>> {
        self.with_service(|service| service.list_notes())
    }

    pub fn count(&self) -> NoteServiceResult<u64> {
        self.with_service(|service| service.count_notes())
    }

    /// Overwrites note text, keeping `created_at`. Returns matched rows.
    pub fn update(&self, id: NoteId, text: &str) -> NoteServiceResult<usize> {
        self.with_service(|service| service.update_note(id, text))
    }

    /// Removes the note if present.
    pub fn delete(&self, id: NoteId) -> NoteServiceResult<()> {
        self.with_service(|service| service.delete_note(id))
    }

    fn with_service<T>(
        &self,
        f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> NoteServiceResult<T>,
    ) -> NoteServiceResult<T> {
        let _guard = self.op_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let conn = open_db_with_policy(&self.config.db_path, self.config.upgrade_policy)
            .map_err(|err| NoteServiceError::Storage(RepoError::Db(err)))?;
        let service = NoteService::new(SqliteNoteRepository::new(&conn));
        f(&service)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StoreConfig};
    use crate::db::UpgradePolicy;
    use crate::service::note_service::NoteServiceError;

    #[test]
    fn store_config_defaults_to_migrate_policy() {
        let config = StoreConfig::new("/tmp/notes.sqlite3");
        assert_eq!(config.upgrade_policy, UpgradePolicy::Migrate);

        let legacy = config.with_upgrade_policy(UpgradePolicy::Recreate);
        assert_eq!(legacy.upgrade_policy, UpgradePolicy::Recreate);
    }

    #[test]
    fn store_config_uses_snake_case_policy_and_defaults_when_absent() {
        let config = StoreConfig::new("/tmp/notes.sqlite3")
            .with_upgrade_policy(UpgradePolicy::Recreate);

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["db_path"], "/tmp/notes.sqlite3");
        assert_eq!(value["upgrade_policy"], "recreate");
        assert_eq!(serde_json::from_value::<StoreConfig>(value).unwrap(), config);

        let minimal: StoreConfig =
            serde_json::from_str(r#"{"db_path":"/tmp/a.sqlite3"}"#).unwrap();
        assert_eq!(minimal, StoreConfig::new("/tmp/a.sqlite3"));
        assert!(serde_json::from_str::<StoreConfig>(
            r#"{"db_path":"/tmp/a.sqlite3","upgrade_policy":"drop_everything"}"#
        )
        .is_err());
    }

    #[test]
    fn unreachable_storage_surfaces_as_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::new(StoreConfig::new(dir.path().join("missing").join("x.db")));

        let err = store.count().unwrap_err();

        assert!(matches!(err, NoteServiceError::Storage(_)));
    }
}
