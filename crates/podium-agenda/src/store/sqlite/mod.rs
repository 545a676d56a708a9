//! SQLite-backed store.
//!
//! A thin facade over a connection pool and the stateless repositories. Each
//! trait method checks out one connection and issues one statement (plus the
//! read in read-modify-write updates); there is no cross-call transaction,
//! matching the engine's sequencing model.

pub mod connection;
pub mod migrations;
pub mod repositories;

use std::path::Path;

use podium_core::{ConferenceId, Presentation, PresentationId, Session, SessionId};

use crate::errors::StoreError;
use crate::store::sqlite::connection::{ConnectionPool, PooledConnection};
use crate::store::sqlite::repositories::presentation::PresentationRepo;
use crate::store::sqlite::repositories::session::SessionRepo;
use crate::store::{
    CreatePresentation, CreateSession, PresentationPatch, PresentationStore, SessionStore,
};

/// Store implementation over a pooled SQLite database.
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    /// Open (and migrate) a database file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            pool: connection::open_pool(path)?,
        })
    }

    /// Open an in-memory database (tests, fixtures).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            pool: connection::open_in_memory_pool()?,
        })
    }

    /// Wrap an already-built pool. The caller is responsible for migrations.
    #[must_use]
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection, StoreError> {
        Ok(self.pool.get()?)
    }
}

impl PresentationStore for SqliteStore {
    fn list_by_session(&self, session_id: &SessionId) -> Result<Vec<Presentation>, StoreError> {
        Ok(PresentationRepo::list_by_session(
            &*self.conn()?,
            session_id.as_str(),
        )?)
    }

    fn get(&self, id: &PresentationId) -> Result<Option<Presentation>, StoreError> {
        Ok(PresentationRepo::get_by_id(&*self.conn()?, id)?)
    }

    fn create(&self, data: CreatePresentation) -> Result<Presentation, StoreError> {
        Ok(PresentationRepo::create(&*self.conn()?, &data)?)
    }

    fn update(
        &self,
        id: &PresentationId,
        patch: &PresentationPatch,
    ) -> Result<Presentation, StoreError> {
        PresentationRepo::update(&*self.conn()?, id, patch)?
            .ok_or_else(|| StoreError::PresentationNotFound(id.clone()))
    }

    fn delete(&self, id: &PresentationId) -> Result<(), StoreError> {
        if PresentationRepo::delete(&*self.conn()?, id)? {
            Ok(())
        } else {
            Err(StoreError::PresentationNotFound(id.clone()))
        }
    }
}

impl SessionStore for SqliteStore {
    fn list_by_conference(
        &self,
        conference_id: &ConferenceId,
    ) -> Result<Vec<Session>, StoreError> {
        Ok(SessionRepo::list_by_conference(
            &*self.conn()?,
            conference_id.as_str(),
        )?)
    }

    fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        Ok(SessionRepo::get_by_id(&*self.conn()?, id)?)
    }

    fn find_default(&self, conference_id: &ConferenceId) -> Result<Option<Session>, StoreError> {
        Ok(SessionRepo::find_default(
            &*self.conn()?,
            conference_id.as_str(),
        )?)
    }

    fn create(&self, data: CreateSession) -> Result<Session, StoreError> {
        Ok(SessionRepo::create(&*self.conn()?, &data)?)
    }

    fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        if SessionRepo::delete(&*self.conn()?, id)? {
            Ok(())
        } else {
            Err(StoreError::SessionNotFound(id.clone()))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use podium_core::PresentationStatus;

    use super::*;

    #[test]
    fn update_maps_missing_row_to_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store
            .update(
                &PresentationId::new("prs_missing"),
                &PresentationPatch::position(1),
            )
            .unwrap_err();
        assert_matches!(err, StoreError::PresentationNotFound(_));
    }

    #[test]
    fn delete_maps_missing_rows_to_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err =
            PresentationStore::delete(&store, &PresentationId::new("prs_missing")).unwrap_err();
        assert_matches!(err, StoreError::PresentationNotFound(_));

        let err = SessionStore::delete(&store, &SessionId::new("ses_missing")).unwrap_err();
        assert_matches!(err, StoreError::SessionNotFound(_));
    }

    #[test]
    fn trait_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = SessionStore::create(
            &store,
            CreateSession {
                conference_id: ConferenceId::new("conf_1"),
                session_number: 1,
                session_name: "Morning".to_string(),
            },
        )
        .unwrap();

        let created = PresentationStore::create(
            &store,
            CreatePresentation {
                title: "Talk".to_string(),
                conference_id: ConferenceId::new("conf_1"),
                session_id: session.id.clone(),
                agenda_position: 1,
                presenter_ids: vec![],
                status: PresentationStatus::Active,
            },
        )
        .unwrap();

        let listed = store.list_by_session(&session.id).unwrap();
        assert_eq!(listed, vec![created]);
    }
}
