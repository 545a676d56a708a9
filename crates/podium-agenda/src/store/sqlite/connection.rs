//! Connection pool setup for the SQLite store.

use std::path::Path;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::errors::StoreError;
use crate::store::sqlite::migrations::run_migrations;

/// r2d2 pool of SQLite connections.
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// A connection checked out of the pool.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

fn configure(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
}

/// Open a pool on a database file, creating and migrating it as needed.
pub fn open_pool(path: &Path) -> Result<ConnectionPool, StoreError> {
    let manager = SqliteConnectionManager::file(path).with_init(configure);
    let pool = r2d2::Pool::builder().build(manager)?;
    let conn = pool.get()?;
    run_migrations(&conn)?;
    Ok(pool)
}

/// Open a single-connection in-memory pool (tests, fixtures).
///
/// Pool size must stay 1: every in-memory connection is its own database.
pub fn open_in_memory_pool() -> Result<ConnectionPool, StoreError> {
    let manager = SqliteConnectionManager::memory().with_init(configure);
    let pool = r2d2::Pool::builder().max_size(1).build(manager)?;
    let conn = pool.get()?;
    run_migrations(&conn)?;
    Ok(pool)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
