//! In-memory store — `Mutex<HashMap>` maps, no persistence.
//!
//! Backs the engine unit tests and is embeddable wherever a throwaway store
//! is enough (previews, fixtures). Implements both store traits on one type
//! so a single instance can be handed to the engine twice.

use std::collections::HashMap;
use std::sync::Mutex;

use podium_core::{ConferenceId, Presentation, PresentationId, Session, SessionId};

use crate::errors::StoreError;
use crate::store::{
    CreatePresentation, CreateSession, PresentationPatch, PresentationStore, SessionStore,
};

/// Shared in-memory store for presentations and sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    presentations: Mutex<HashMap<PresentationId, Presentation>>,
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_presentations(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<PresentationId, Presentation>>, StoreError> {
        self.presentations
            .lock()
            .map_err(|_| StoreError::Internal("presentation map lock poisoned".to_string()))
    }

    fn lock_sessions(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, Session>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|_| StoreError::Internal("session map lock poisoned".to_string()))
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl PresentationStore for MemoryStore {
    fn list_by_session(&self, session_id: &SessionId) -> Result<Vec<Presentation>, StoreError> {
        let map = self.lock_presentations()?;
        let mut rows: Vec<Presentation> = map
            .values()
            .filter(|p| &p.session_id == session_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.agenda_position
                .cmp(&b.agenda_position)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    fn get(&self, id: &PresentationId) -> Result<Option<Presentation>, StoreError> {
        Ok(self.lock_presentations()?.get(id).cloned())
    }

    fn create(&self, data: CreatePresentation) -> Result<Presentation, StoreError> {
        let now = now();
        let presentation = Presentation {
            id: PresentationId::generate(),
            title: data.title,
            conference_id: data.conference_id,
            session_id: data.session_id,
            agenda_position: data.agenda_position,
            presenter_ids: data.presenter_ids,
            status: data.status,
            created_at: now.clone(),
            updated_at: now,
        };
        let _ = self
            .lock_presentations()?
            .insert(presentation.id.clone(), presentation.clone());
        Ok(presentation)
    }

    fn update(
        &self,
        id: &PresentationId,
        patch: &PresentationPatch,
    ) -> Result<Presentation, StoreError> {
        let mut map = self.lock_presentations()?;
        let presentation = map
            .get_mut(id)
            .ok_or_else(|| StoreError::PresentationNotFound(id.clone()))?;
        if let Some(title) = &patch.title {
            presentation.title = title.clone();
        }
        if let Some(session_id) = &patch.session_id {
            presentation.session_id = session_id.clone();
        }
        if let Some(position) = patch.agenda_position {
            presentation.agenda_position = position;
        }
        if let Some(presenters) = &patch.presenter_ids {
            presentation.presenter_ids = presenters.clone();
        }
        if let Some(status) = patch.status {
            presentation.status = status;
        }
        presentation.updated_at = now();
        Ok(presentation.clone())
    }

    fn delete(&self, id: &PresentationId) -> Result<(), StoreError> {
        match self.lock_presentations()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::PresentationNotFound(id.clone())),
        }
    }
}

impl SessionStore for MemoryStore {
    fn list_by_conference(
        &self,
        conference_id: &ConferenceId,
    ) -> Result<Vec<Session>, StoreError> {
        let map = self.lock_sessions()?;
        let mut rows: Vec<Session> = map
            .values()
            .filter(|s| &s.conference_id == conference_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.session_number
                .cmp(&b.session_number)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.lock_sessions()?.get(id).cloned())
    }

    fn find_default(&self, conference_id: &ConferenceId) -> Result<Option<Session>, StoreError> {
        Ok(self
            .lock_sessions()?
            .values()
            .find(|s| &s.conference_id == conference_id && s.is_default())
            .cloned())
    }

    fn create(&self, data: CreateSession) -> Result<Session, StoreError> {
        let session = Session {
            id: SessionId::generate(),
            conference_id: data.conference_id,
            session_number: data.session_number,
            session_name: data.session_name,
            created_at: now(),
        };
        let _ = self
            .lock_sessions()?
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        match self.lock_sessions()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::SessionNotFound(id.clone())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use podium_core::PresentationStatus;

    use super::*;

    fn create_data(session_id: &SessionId, position: i64) -> CreatePresentation {
        CreatePresentation {
            title: format!("Talk {position}"),
            conference_id: ConferenceId::new("conf_1"),
            session_id: session_id.clone(),
            agenda_position: position,
            presenter_ids: vec![],
            status: PresentationStatus::Active,
        }
    }

    #[test]
    fn create_and_get_presentation() {
        let store = MemoryStore::new();
        let session_id = SessionId::new("ses_1");
        let created = PresentationStore::create(&store, create_data(&session_id, 1)).unwrap();
        assert!(created.id.as_str().starts_with("prs_"));

        let found = PresentationStore::get(&store, &created.id).unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn list_by_session_sorts_by_position() {
        let store = MemoryStore::new();
        let session_id = SessionId::new("ses_1");
        let other = SessionId::new("ses_2");
        let _ = PresentationStore::create(&store, create_data(&session_id, 3)).unwrap();
        let _ = PresentationStore::create(&store, create_data(&session_id, 1)).unwrap();
        let _ = PresentationStore::create(&store, create_data(&other, 2)).unwrap();

        let rows = store.list_by_session(&session_id).unwrap();
        let positions: Vec<i64> = rows.iter().map(|p| p.agenda_position).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn update_unknown_presentation_fails() {
        let store = MemoryStore::new();
        let err = store
            .update(&PresentationId::new("prs_missing"), &PresentationPatch::position(2))
            .unwrap_err();
        assert!(matches!(err, StoreError::PresentationNotFound(_)));
    }

    #[test]
    fn update_applies_patch_fields() {
        let store = MemoryStore::new();
        let session_id = SessionId::new("ses_1");
        let created = PresentationStore::create(&store, create_data(&session_id, 1)).unwrap();

        let target = SessionId::new("ses_9");
        let updated = store
            .update(&created.id, &PresentationPatch::placement(target.clone(), 7))
            .unwrap();
        assert_eq!(updated.session_id, target);
        assert_eq!(updated.agenda_position, 7);
        // Untouched fields survive.
        assert_eq!(updated.title, created.title);
    }

    #[test]
    fn delete_unknown_presentation_fails() {
        let store = MemoryStore::new();
        let err = PresentationStore::delete(&store, &PresentationId::new("prs_missing"))
            .unwrap_err();
        assert!(matches!(err, StoreError::PresentationNotFound(_)));
    }

    #[test]
    fn find_default_matches_reserved_name() {
        let store = MemoryStore::new();
        let conference_id = ConferenceId::new("conf_1");
        let _ = SessionStore::create(
            &store,
            CreateSession {
                conference_id: conference_id.clone(),
                session_number: 1,
                session_name: "Morning".to_string(),
            })
            .unwrap();
        assert!(store.find_default(&conference_id).unwrap().is_none());

        let default = SessionStore::create(
            &store,
            CreateSession {
                conference_id: conference_id.clone(),
                session_number: 0,
                session_name: podium_core::DEFAULT_SESSION_NAME.to_string(),
            })
            .unwrap();
        let found = store.find_default(&conference_id).unwrap().unwrap();
        assert_eq!(found.id, default.id);
    }

    #[test]
    fn list_by_conference_sorts_by_number() {
        let store = MemoryStore::new();
        let conference_id = ConferenceId::new("conf_1");
        for n in [2, 0, 1] {
            let _ = SessionStore::create(
                &store,
                CreateSession {
                    conference_id: conference_id.clone(),
                    session_number: n,
                    session_name: format!("S{n}"),
                },
            )
            .unwrap();
        }
        let rows = store.list_by_conference(&conference_id).unwrap();
        let numbers: Vec<i64> = rows.iter().map(|s| s.session_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn delete_session_removes_record() {
        let store = MemoryStore::new();
        let session = SessionStore::create(
            &store,
            CreateSession {
                conference_id: ConferenceId::new("conf_1"),
                session_number: 1,
                session_name: "S1".to_string(),
            })
            .unwrap();
        SessionStore::delete(&store, &session.id).unwrap();
        assert!(SessionStore::get(&store, &session.id).unwrap().is_none());

        let err = SessionStore::delete(&store, &session.id).unwrap_err();
        assert!(matches!(err, StoreError::SessionNotFound(_)));
    }
}
