//! Session lifecycle — deleting sessions without losing presentations.
//!
//! A non-default session is deleted in two flavors: *cascade* removes its
//! presentations with it; *migrate* appends them to the conference's default
//! session, renumbered after the default session's current maximum so their
//! relative order survives. The session record itself is only deleted after
//! every presentation write succeeded, so a mid-sequence failure leaves the
//! session (and its remaining presentations) in place.

use tracing::{debug, instrument, warn};

use podium_core::{
    ConferenceId, DEFAULT_SESSION_NAME, Presentation, PresentationId, Session, SessionId,
};

use crate::errors::{AgendaError, CascadeOperation, Result};
use crate::ordering::next_append_position;
use crate::store::{CreateSession, PresentationPatch, PresentationStore, SessionStore};

/// Report of a completed session deletion.
#[derive(Clone, Debug)]
pub struct DeleteSessionResult {
    /// The session that was deleted.
    pub session: Session,
    /// Presentations deleted with it (cascade mode).
    pub deleted: Vec<PresentationId>,
    /// Presentations migrated into the default session, with their new
    /// positions (migrate mode).
    pub migrated: Vec<Presentation>,
    /// The default session that received the migrated presentations.
    pub default_session: Option<Session>,
    /// Whether the default session had to be recreated first.
    pub recreated_default: bool,
}

/// Deletes sessions while keeping the default session and every
/// presentation accounted for.
pub struct SessionLifecycle<'a, P: ?Sized, S: ?Sized> {
    presentations: &'a P,
    sessions: &'a S,
}

impl<'a, P, S> SessionLifecycle<'a, P, S>
where
    P: PresentationStore + ?Sized,
    S: SessionStore + ?Sized,
{
    /// Create a lifecycle manager over the given stores.
    pub fn new(presentations: &'a P, sessions: &'a S) -> Self {
        Self {
            presentations,
            sessions,
        }
    }

    /// Resolve the conference's default session, recreating it if missing.
    ///
    /// Every conference is supposed to get its default session at creation
    /// time; recreating one here is invariant repair, not normal operation.
    /// Returns the session and whether it had to be created.
    #[instrument(skip(self), fields(conference_id = %conference_id))]
    pub fn ensure_default_session(
        &self,
        conference_id: &ConferenceId,
    ) -> Result<(Session, bool)> {
        if let Some(existing) = self.sessions.find_default(conference_id)? {
            return Ok((existing, false));
        }
        warn!("default session missing, recreating");
        let created = self.sessions.create(CreateSession {
            conference_id: conference_id.clone(),
            session_number: 0,
            session_name: DEFAULT_SESSION_NAME.to_string(),
        })?;
        Ok((created, true))
    }

    /// Delete a non-default session.
    ///
    /// With `cascade_delete_presentations` its presentations are deleted
    /// too; otherwise they are migrated into the conference's default
    /// session, appended after its current maximum position in their
    /// current order. The default session itself is never deletable.
    ///
    /// On a mid-sequence write failure the session record is kept and
    /// [`AgendaError::PartialFailure`] reports which presentations were
    /// already processed.
    #[instrument(skip(self), fields(session_id = %session_id, cascade = cascade_delete_presentations))]
    pub fn delete_session(
        &self,
        session_id: &SessionId,
        cascade_delete_presentations: bool,
    ) -> Result<DeleteSessionResult> {
        let session = self
            .sessions
            .get(session_id)?
            .ok_or_else(|| AgendaError::SessionNotFound(session_id.clone()))?;
        if session.is_default() {
            return Err(AgendaError::DefaultSessionProtected(session_id.clone()));
        }

        let members = self.presentations.list_by_session(session_id)?;
        let mut result = DeleteSessionResult {
            session,
            deleted: Vec::new(),
            migrated: Vec::new(),
            default_session: None,
            recreated_default: false,
        };

        if cascade_delete_presentations {
            self.cascade_delete(&members, &mut result)?;
        } else {
            self.migrate_to_default(&members, &mut result)?;
        }

        self.sessions.delete(session_id)?;
        debug!(
            deleted = result.deleted.len(),
            migrated = result.migrated.len(),
            "session deleted"
        );
        Ok(result)
    }

    fn cascade_delete(
        &self,
        members: &[Presentation],
        result: &mut DeleteSessionResult,
    ) -> Result<()> {
        for presentation in members {
            if let Err(source) = self.presentations.delete(&presentation.id) {
                return Err(AgendaError::PartialFailure {
                    operation: CascadeOperation::CascadeDelete,
                    completed: std::mem::take(&mut result.deleted),
                    total: members.len(),
                    source,
                });
            }
            result.deleted.push(presentation.id.clone());
        }
        Ok(())
    }

    fn migrate_to_default(
        &self,
        members: &[Presentation],
        result: &mut DeleteSessionResult,
    ) -> Result<()> {
        let (default_session, recreated) =
            self.ensure_default_session(&result.session.conference_id)?;
        result.recreated_default = recreated;

        let existing = self.presentations.list_by_session(&default_session.id)?;
        let next = next_append_position(&existing);

        // `members` comes back position-ascending from the store, which is
        // exactly the relative order to preserve.
        for (offset, presentation) in members.iter().enumerate() {
            let new_position = next + offset as i64;
            match self.presentations.update(
                &presentation.id,
                &PresentationPatch::placement(default_session.id.clone(), new_position),
            ) {
                Ok(updated) => result.migrated.push(updated),
                Err(source) => {
                    return Err(AgendaError::PartialFailure {
                        operation: CascadeOperation::Migrate,
                        completed: result.migrated.iter().map(|p| p.id.clone()).collect(),
                        total: members.len(),
                        source,
                    });
                }
            }
        }

        result.default_session = Some(default_session);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
