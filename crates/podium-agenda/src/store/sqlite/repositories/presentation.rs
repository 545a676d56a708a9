//! Presentation repository — CRUD for the `presentations` table.
//!
//! Positions are plain integers here; clamping, shifting, and swapping are
//! the ordering engine's job. `presenter_ids` is stored as a JSON array in a
//! text column.

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use podium_core::{Presentation, PresentationId, PresentationStatus, UserId};

use crate::store::{CreatePresentation, PresentationPatch};

const COLUMNS: &str = "id, title, conference_id, session_id, agenda_position, \
                       presenter_ids, status, created_at, updated_at";

/// Presentation repository — stateless, every method takes `&Connection`.
pub struct PresentationRepo;

impl PresentationRepo {
    /// Insert a new presentation, assigning ID and timestamps.
    pub fn create(
        conn: &Connection,
        data: &CreatePresentation,
    ) -> Result<Presentation, rusqlite::Error> {
        let id = PresentationId::generate();
        let now = chrono::Utc::now().to_rfc3339();
        let presenters = serde_json::to_string(&data.presenter_ids)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let _ = conn.execute(
            "INSERT INTO presentations
                 (id, title, conference_id, session_id, agenda_position,
                  presenter_ids, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id.as_str(),
                data.title,
                data.conference_id.as_str(),
                data.session_id.as_str(),
                data.agenda_position,
                presenters,
                data.status.as_str(),
                now,
                now
            ],
        )?;
        Ok(Presentation {
            id,
            title: data.title.clone(),
            conference_id: data.conference_id.clone(),
            session_id: data.session_id.clone(),
            agenda_position: data.agenda_position,
            presenter_ids: data.presenter_ids.clone(),
            status: data.status,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a presentation by ID.
    pub fn get_by_id(
        conn: &Connection,
        id: &PresentationId,
    ) -> Result<Option<Presentation>, rusqlite::Error> {
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM presentations WHERE id = ?1"),
            params![id.as_str()],
            Self::map_row,
        )
        .optional()
    }

    /// All presentations in a session, position ascending.
    pub fn list_by_session(
        conn: &Connection,
        session_id: &str,
    ) -> Result<Vec<Presentation>, rusqlite::Error> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM presentations
             WHERE session_id = ?1
             ORDER BY agenda_position ASC, id ASC"
        ))?;
        let rows = stmt
            .query_map(params![session_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Apply a patch. Returns `None` if the presentation does not exist.
    pub fn update(
        conn: &Connection,
        id: &PresentationId,
        patch: &PresentationPatch,
    ) -> Result<Option<Presentation>, rusqlite::Error> {
        let Some(mut current) = Self::get_by_id(conn, id)? else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            current.title = title.clone();
        }
        if let Some(session_id) = &patch.session_id {
            current.session_id = session_id.clone();
        }
        if let Some(position) = patch.agenda_position {
            current.agenda_position = position;
        }
        if let Some(presenters) = &patch.presenter_ids {
            current.presenter_ids = presenters.clone();
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        current.updated_at = chrono::Utc::now().to_rfc3339();

        let presenters = serde_json::to_string(&current.presenter_ids)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let _ = conn.execute(
            "UPDATE presentations
             SET title = ?1, session_id = ?2, agenda_position = ?3,
                 presenter_ids = ?4, status = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                current.title,
                current.session_id.as_str(),
                current.agenda_position,
                presenters,
                current.status.as_str(),
                current.updated_at,
                id.as_str()
            ],
        )?;
        Ok(Some(current))
    }

    /// Delete a presentation. Returns `true` if a row was deleted.
    pub fn delete(conn: &Connection, id: &PresentationId) -> Result<bool, rusqlite::Error> {
        let changed = conn.execute(
            "DELETE FROM presentations WHERE id = ?1",
            params![id.as_str()],
        )?;
        Ok(changed > 0)
    }

    /// Count presentations in a session.
    pub fn count_by_session(
        conn: &Connection,
        session_id: &str,
    ) -> Result<i64, rusqlite::Error> {
        conn.query_row(
            "SELECT COUNT(*) FROM presentations WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )
    }

    fn map_row(row: &Row<'_>) -> Result<Presentation, rusqlite::Error> {
        let presenters_json: String = row.get(5)?;
        let presenter_ids: Vec<UserId> = serde_json::from_str(&presenters_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
        let status_text: String = row.get(6)?;
        let status = PresentationStatus::parse(&status_text).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                Type::Text,
                format!("unknown presentation status: {status_text}").into(),
            )
        })?;
        Ok(Presentation {
            id: PresentationId::new(row.get::<_, String>(0)?),
            title: row.get(1)?,
            conference_id: row.get::<_, String>(2)?.into(),
            session_id: row.get::<_, String>(3)?.into(),
            agenda_position: row.get(4)?,
            presenter_ids,
            status,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use podium_core::{ConferenceId, SessionId};

    use super::*;
    use crate::store::sqlite::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")
            .unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn create_data(session: &str, position: i64) -> CreatePresentation {
        CreatePresentation {
            title: format!("Talk {position}"),
            conference_id: ConferenceId::new("conf_1"),
            session_id: SessionId::new(session),
            agenda_position: position,
            presenter_ids: vec![UserId::new("usr_1"), UserId::new("usr_2")],
            status: PresentationStatus::Active,
        }
    }

    #[test]
    fn create_presentation() {
        let conn = setup();
        let p = PresentationRepo::create(&conn, &create_data("ses_1", 1)).unwrap();
        assert!(p.id.as_str().starts_with("prs_"));
        assert_eq!(p.agenda_position, 1);
        assert_eq!(p.presenter_ids.len(), 2);
    }

    #[test]
    fn get_by_id_round_trips_json_column() {
        let conn = setup();
        let created = PresentationRepo::create(&conn, &create_data("ses_1", 2)).unwrap();
        let found = PresentationRepo::get_by_id(&conn, &created.id).unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn get_by_id_not_found() {
        let conn = setup();
        let found =
            PresentationRepo::get_by_id(&conn, &PresentationId::new("prs_missing")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn list_by_session_orders_by_position() {
        let conn = setup();
        for position in [3, 1, 2] {
            PresentationRepo::create(&conn, &create_data("ses_1", position)).unwrap();
        }
        PresentationRepo::create(&conn, &create_data("ses_other", 1)).unwrap();

        let rows = PresentationRepo::list_by_session(&conn, "ses_1").unwrap();
        let positions: Vec<i64> = rows.iter().map(|p| p.agenda_position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn update_position_only() {
        let conn = setup();
        let created = PresentationRepo::create(&conn, &create_data("ses_1", 1)).unwrap();
        let updated = PresentationRepo::update(&conn, &created.id, &PresentationPatch::position(4))
            .unwrap()
            .unwrap();
        assert_eq!(updated.agenda_position, 4);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.session_id, created.session_id);
    }

    #[test]
    fn update_placement_moves_sessions() {
        let conn = setup();
        let created = PresentationRepo::create(&conn, &create_data("ses_1", 1)).unwrap();
        let updated = PresentationRepo::update(
            &conn,
            &created.id,
            &PresentationPatch::placement(SessionId::new("ses_2"), 7),
        )
        .unwrap()
        .unwrap();
        assert_eq!(updated.session_id.as_str(), "ses_2");
        assert_eq!(updated.agenda_position, 7);
        assert!(PresentationRepo::list_by_session(&conn, "ses_1").unwrap().is_empty());
    }

    #[test]
    fn update_not_found() {
        let conn = setup();
        let updated = PresentationRepo::update(
            &conn,
            &PresentationId::new("prs_missing"),
            &PresentationPatch::position(1),
        )
        .unwrap();
        assert!(updated.is_none());
    }

    #[test]
    fn delete_presentation() {
        let conn = setup();
        let created = PresentationRepo::create(&conn, &create_data("ses_1", 1)).unwrap();
        assert!(PresentationRepo::delete(&conn, &created.id).unwrap());
        assert!(PresentationRepo::get_by_id(&conn, &created.id).unwrap().is_none());
        assert!(!PresentationRepo::delete(&conn, &created.id).unwrap());
    }

    #[test]
    fn count_by_session() {
        let conn = setup();
        assert_eq!(PresentationRepo::count_by_session(&conn, "ses_1").unwrap(), 0);
        PresentationRepo::create(&conn, &create_data("ses_1", 1)).unwrap();
        PresentationRepo::create(&conn, &create_data("ses_1", 2)).unwrap();
        assert_eq!(PresentationRepo::count_by_session(&conn, "ses_1").unwrap(), 2);
    }
}
