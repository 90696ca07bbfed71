//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger catalogue creation/seeding before returning a usable connection.
//!
//! # Invariants
//! - Open failures surface as `DbError::StorageUnavailable`.
//! - A seeding conflict is reported through `SeedStatus`, never as an open
//!   failure.

use super::seed::{ensure_catalogue, SeedStatus};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Opens the catalogue database file, creating and seeding it when needed.
///
/// # Side effects
/// - Creates the backing file when absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<(Connection, SeedStatus)> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::StorageUnavailable {
                location: path.to_path_buf(),
                source: err,
            });
        }
    };

    finish_open(conn, path.to_path_buf(), "file", started_at)
}

/// Opens an in-memory catalogue database. Used by tests and dry runs.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<(Connection, SeedStatus)> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::StorageUnavailable {
                location: PathBuf::from(":memory:"),
                source: err,
            });
        }
    };

    finish_open(conn, PathBuf::from(":memory:"), "memory", started_at)
}

fn finish_open(
    mut conn: Connection,
    location: PathBuf,
    mode: &str,
    started_at: Instant,
) -> DbResult<(Connection, SeedStatus)> {
    match bootstrap_connection(&mut conn) {
        Ok(status) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={} seed={}",
                mode,
                started_at.elapsed().as_millis(),
                status.as_str()
            );
            Ok((conn, status))
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            // Unreadable or non-database files fail here, not in `open`.
            match err {
                DbError::Sqlite(source) => Err(DbError::StorageUnavailable { location, source }),
                other => Err(other),
            }
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<SeedStatus> {
    conn.busy_timeout(Duration::from_secs(5))?;
    ensure_catalogue(conn)
}
