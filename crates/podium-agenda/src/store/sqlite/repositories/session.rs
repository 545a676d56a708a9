//! Session repository — CRUD for the `sessions` table.
//!
//! The default session is an ordinary row whose name is the reserved
//! `"presentations"`; protection against editing or deleting it lives in the
//! lifecycle layer, not here.

use rusqlite::{Connection, OptionalExtension, Row, params};

use podium_core::{DEFAULT_SESSION_NAME, Session, SessionId};

use crate::store::CreateSession;

const COLUMNS: &str = "id, conference_id, session_number, session_name, created_at";

/// Session repository — stateless, every method takes `&Connection`.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, assigning ID and timestamp.
    pub fn create(conn: &Connection, data: &CreateSession) -> Result<Session, rusqlite::Error> {
        let id = SessionId::generate();
        let now = chrono::Utc::now().to_rfc3339();
        let _ = conn.execute(
            "INSERT INTO sessions (id, conference_id, session_number, session_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id.as_str(),
                data.conference_id.as_str(),
                data.session_number,
                data.session_name,
                now
            ],
        )?;
        Ok(Session {
            id,
            conference_id: data.conference_id.clone(),
            session_number: data.session_number,
            session_name: data.session_name.clone(),
            created_at: now,
        })
    }

    /// Get a session by ID.
    pub fn get_by_id(
        conn: &Connection,
        id: &SessionId,
    ) -> Result<Option<Session>, rusqlite::Error> {
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM sessions WHERE id = ?1"),
            params![id.as_str()],
            Self::map_row,
        )
        .optional()
    }

    /// All sessions of a conference, session number ascending.
    pub fn list_by_conference(
        conn: &Connection,
        conference_id: &str,
    ) -> Result<Vec<Session>, rusqlite::Error> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE conference_id = ?1
             ORDER BY session_number ASC"
        ))?;
        let rows = stmt
            .query_map(params![conference_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The conference's default session, if present.
    pub fn find_default(
        conn: &Connection,
        conference_id: &str,
    ) -> Result<Option<Session>, rusqlite::Error> {
        conn.query_row(
            &format!(
                "SELECT {COLUMNS} FROM sessions
                 WHERE conference_id = ?1 AND session_name = ?2"
            ),
            params![conference_id, DEFAULT_SESSION_NAME],
            Self::map_row,
        )
        .optional()
    }

    /// Delete a session. Returns `true` if a row was deleted.
    pub fn delete(conn: &Connection, id: &SessionId) -> Result<bool, rusqlite::Error> {
        let changed = conn.execute("DELETE FROM sessions WHERE id = ?1", params![id.as_str()])?;
        Ok(changed > 0)
    }

    fn map_row(row: &Row<'_>) -> Result<Session, rusqlite::Error> {
        Ok(Session {
            id: SessionId::new(row.get::<_, String>(0)?),
            conference_id: row.get::<_, String>(1)?.into(),
            session_number: row.get(2)?,
            session_name: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
