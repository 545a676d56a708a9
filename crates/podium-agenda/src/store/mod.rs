//! Store contracts the engine operates against.
//!
//! The ordering engine and session lifecycle never talk to a database
//! directly; they consume these two traits. The crate ships a SQLite-backed
//! implementation ([`sqlite::SqliteStore`]) and an in-memory one
//! ([`memory::MemoryStore`]); the surrounding application is free to
//! substitute its own persistence.
//!
//! Every call is an independent read or write — there is no cross-call
//! transaction. Multi-step operations in the engine are sequenced so that
//! every prefix of the sequence leaves the data valid.

pub mod memory;
pub mod sqlite;

use podium_core::{
    ConferenceId, Presentation, PresentationId, PresentationStatus, Session, SessionId, UserId,
};

use crate::errors::StoreError;

/// Data for creating a presentation. The store assigns ID and timestamps.
///
/// `agenda_position` here is the *final* position; desired-position
/// resolution (clamping, shifting) happens in the ordering engine before
/// this struct is built.
#[derive(Clone, Debug)]
pub struct CreatePresentation {
    /// Presentation title.
    pub title: String,
    /// Owning conference.
    pub conference_id: ConferenceId,
    /// Owning session.
    pub session_id: SessionId,
    /// Final agenda position.
    pub agenda_position: i64,
    /// Presenters.
    pub presenter_ids: Vec<UserId>,
    /// Rating visibility.
    pub status: PresentationStatus,
}

/// Field-wise patch for updating a presentation. `None` leaves a field as is.
#[derive(Clone, Debug, Default)]
pub struct PresentationPatch {
    /// New title.
    pub title: Option<String>,
    /// New owning session.
    pub session_id: Option<SessionId>,
    /// New agenda position.
    pub agenda_position: Option<i64>,
    /// New presenter set.
    pub presenter_ids: Option<Vec<UserId>>,
    /// New status.
    pub status: Option<PresentationStatus>,
}

impl PresentationPatch {
    /// Patch that only changes the agenda position.
    #[must_use]
    pub fn position(agenda_position: i64) -> Self {
        Self {
            agenda_position: Some(agenda_position),
            ..Self::default()
        }
    }

    /// Patch that reassigns a presentation to another session slot.
    #[must_use]
    pub fn placement(session_id: SessionId, agenda_position: i64) -> Self {
        Self {
            session_id: Some(session_id),
            agenda_position: Some(agenda_position),
            ..Self::default()
        }
    }
}

/// Data for creating a session. The store assigns ID and timestamp.
#[derive(Clone, Debug)]
pub struct CreateSession {
    /// Owning conference.
    pub conference_id: ConferenceId,
    /// Human ordering of sessions within the conference.
    pub session_number: i64,
    /// Display name.
    pub session_name: String,
}

/// Persistence contract for presentations.
pub trait PresentationStore {
    /// All presentations in a session, ordered by `agenda_position` ascending.
    fn list_by_session(&self, session_id: &SessionId) -> Result<Vec<Presentation>, StoreError>;

    /// Look up a presentation by ID.
    fn get(&self, id: &PresentationId) -> Result<Option<Presentation>, StoreError>;

    /// Create a presentation, assigning its ID.
    fn create(&self, data: CreatePresentation) -> Result<Presentation, StoreError>;

    /// Apply a patch. Fails with [`StoreError::PresentationNotFound`] for an
    /// unknown ID.
    fn update(
        &self,
        id: &PresentationId,
        patch: &PresentationPatch,
    ) -> Result<Presentation, StoreError>;

    /// Delete a presentation. Fails with
    /// [`StoreError::PresentationNotFound`] for an unknown ID.
    fn delete(&self, id: &PresentationId) -> Result<(), StoreError>;
}

/// Persistence contract for sessions.
pub trait SessionStore {
    /// All sessions of a conference, ordered by `session_number` ascending.
    fn list_by_conference(
        &self,
        conference_id: &ConferenceId,
    ) -> Result<Vec<Session>, StoreError>;

    /// Look up a session by ID.
    fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// The conference's default session, if present.
    fn find_default(&self, conference_id: &ConferenceId) -> Result<Option<Session>, StoreError>;

    /// Create a session, assigning its ID.
    fn create(&self, data: CreateSession) -> Result<Session, StoreError>;

    /// Delete a session. Fails with [`StoreError::SessionNotFound`] for an
    /// unknown ID.
    fn delete(&self, id: &SessionId) -> Result<(), StoreError>;
}
