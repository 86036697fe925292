//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Run the schema step before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have a 5s busy timeout.
//! - Returned connections have the `notes` schema at the latest version.

use super::migrations::apply_migrations;
use super::{DbResult, UpgradePolicy};
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file with the default [`UpgradePolicy::Migrate`].
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with_policy(path, UpgradePolicy::default())
}

/// Opens a SQLite database file and brings its schema up to date.
///
/// # Side effects
/// - Creates the file when it does not exist.
/// - May drop stored notes when `policy` is [`UpgradePolicy::Recreate`].
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_with_policy(path: impl AsRef<Path>, policy: UpgradePolicy) -> DbResult<Connection> {
    bootstrap("file", policy, || Connection::open(path))
}

/// Opens an in-memory SQLite database with the latest schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    bootstrap("memory", UpgradePolicy::Migrate, Connection::open_in_memory)
}

fn bootstrap(
    mode: &'static str,
    policy: UpgradePolicy,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    debug!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match configure_connection(&mut conn, policy) {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &mut Connection, policy: UpgradePolicy) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn, policy)?;
    Ok(())
}
