//! SQLite schema registry and upgrade executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically, or rebuild the table when the
//!   caller opted into the destructive upgrade policy.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied schema version is mirrored to `PRAGMA user_version`.
//! - A database newer than this binary is rejected, never downgraded.

use crate::db::{DbError, DbResult, UpgradePolicy};
use log::{info, warn};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

const DROP_NOTES_SQL: &str = "DROP TABLE IF EXISTS notes;";

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    latest_in(MIGRATIONS)
}

/// Brings the connection's schema to the latest version using `policy`.
pub fn apply_migrations(conn: &mut Connection, policy: UpgradePolicy) -> DbResult<()> {
    apply_registry(conn, MIGRATIONS, policy)
}

fn latest_in(registry: &[Migration]) -> u32 {
    registry.last().map_or(0, |migration| migration.version)
}

fn apply_registry(
    conn: &mut Connection,
    registry: &[Migration],
    policy: UpgradePolicy,
) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_in(registry);

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    // Version 0 is a fresh file; only a real upgrade triggers the rebuild.
    let rebuild = policy == UpgradePolicy::Recreate && current_version > 0;
    let start_after = if rebuild { 0 } else { current_version };

    let tx = conn.transaction()?;
    if rebuild {
        warn!(
            "event=db_migrate module=db status=rebuild from_version={} to_version={}",
            current_version, latest
        );
        tx.execute_batch(DROP_NOTES_SQL)?;
    }
    for migration in registry {
        if migration.version <= start_after {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current_version, latest
    );
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{apply_registry, current_user_version, Migration, MIGRATIONS};
    use crate::db::UpgradePolicy;
    use rusqlite::Connection;

    const NEXT_REGISTRY: &[Migration] = &[
        Migration {
            version: 1,
            sql: include_str!("0001_init.sql"),
        },
        Migration {
            version: 2,
            sql: "ALTER TABLE notes ADD COLUMN pinned INTEGER NOT NULL DEFAULT 0;",
        },
    ];

    fn seeded_v1() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_registry(&mut conn, MIGRATIONS, UpgradePolicy::Migrate).unwrap();
        conn.execute("INSERT INTO notes (note) VALUES (?1);", ["kept?"])
            .unwrap();
        conn
    }

    fn note_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn migrate_policy_preserves_rows_across_version_bump() {
        let mut conn = seeded_v1();

        apply_registry(&mut conn, NEXT_REGISTRY, UpgradePolicy::Migrate).unwrap();

        assert_eq!(current_user_version(&conn).unwrap(), 2);
        assert_eq!(note_count(&conn), 1);
    }

    #[test]
    fn recreate_policy_drops_rows_on_version_bump() {
        let mut conn = seeded_v1();

        apply_registry(&mut conn, NEXT_REGISTRY, UpgradePolicy::Recreate).unwrap();

        assert_eq!(current_user_version(&conn).unwrap(), 2);
        assert_eq!(note_count(&conn), 0);
        let pinned: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('notes') WHERE name = 'pinned';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(pinned, 1);
    }

    #[test]
    fn recreate_policy_is_a_no_op_when_schema_is_current() {
        let mut conn = seeded_v1();

        apply_registry(&mut conn, MIGRATIONS, UpgradePolicy::Recreate).unwrap();

        assert_eq!(note_count(&conn), 1);
    }
}
