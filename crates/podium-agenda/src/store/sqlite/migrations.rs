//! Schema migrations, tracked through `PRAGMA user_version`.

use rusqlite::Connection;

/// Ordered migration scripts. `user_version` records how many have run.
const MIGRATIONS: &[&str] = &[
    // v1: sessions and presentations.
    //
    // The (session_id, agenda_position) index is deliberately NOT unique:
    // shift and swap sequences are independent statements and pass through
    // transient duplicates. Per-session uniqueness is the engine's contract.
    "CREATE TABLE sessions (
         id              TEXT PRIMARY KEY,
         conference_id   TEXT NOT NULL,
         session_number  INTEGER NOT NULL,
         session_name    TEXT NOT NULL,
         created_at      TEXT NOT NULL,
         UNIQUE (conference_id, session_number)
     );
     CREATE INDEX idx_sessions_conference ON sessions (conference_id);

     CREATE TABLE presentations (
         id               TEXT PRIMARY KEY,
         title            TEXT NOT NULL,
         conference_id    TEXT NOT NULL,
         session_id       TEXT NOT NULL,
         agenda_position  INTEGER NOT NULL,
         presenter_ids    TEXT NOT NULL DEFAULT '[]',
         status           TEXT NOT NULL DEFAULT 'ACTIVE',
         created_at       TEXT NOT NULL,
         updated_at       TEXT NOT NULL
     );
     CREATE INDEX idx_presentations_session_position
         ON presentations (session_id, agenda_position);",
];

/// Run all pending migrations on this connection.
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    for (index, migration) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        conn.execute_batch(migration)?;
        conn.pragma_update(None, "user_version", index as i64 + 1)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
