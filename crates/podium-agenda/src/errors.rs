//! Error taxonomy for the agenda engine.
//!
//! Three families, mirroring how the (out-of-scope) REST layer maps failures:
//!
//! - **Not found** — a referenced presentation or session does not exist.
//!   Detected before any mutation; never leaves side effects.
//! - **Invalid operation** — a position below 1, an empty title, or an
//!   attempt to touch the default session. Also detected pre-mutation.
//! - **Partial failure** — a multi-write operation (shift, swap, cascade
//!   delete, migrate) stopped mid-sequence. The error names the writes that
//!   succeeded; the engine performs no automatic compensation or retry.

use std::fmt;

use thiserror::Error;

use podium_core::{PresentationId, SessionId};

/// Convenience result alias used across the crate.
pub type Result<T, E = AgendaError> = std::result::Result<T, E>;

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update/delete referenced an unknown presentation.
    #[error("presentation not found: {0}")]
    PresentationNotFound(PresentationId),

    /// A referenced session does not exist.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// Underlying `SQLite` failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool failure.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Store-internal invariant failure (lock poisoning, bad stored JSON).
    #[error("store error: {0}")]
    Internal(String),
}

/// The multi-write operation a [`AgendaError::PartialFailure`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeOperation {
    /// Shifting later presentations up by one on insert.
    ShiftOnInsert,
    /// Displacing the occupant of a target slot on move.
    SwapOnMove,
    /// Deleting a session's presentations together with the session.
    CascadeDelete,
    /// Migrating a deleted session's presentations into the default session.
    Migrate,
}

impl fmt::Display for CascadeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShiftOnInsert => write!(f, "shift-on-insert"),
            Self::SwapOnMove => write!(f, "swap-on-move"),
            Self::CascadeDelete => write!(f, "cascade-delete"),
            Self::Migrate => write!(f, "migrate"),
        }
    }
}

/// Top-level error type for the ordering engine and session lifecycle.
#[derive(Debug, Error)]
pub enum AgendaError {
    /// The referenced presentation does not exist.
    #[error("presentation not found: {0}")]
    PresentationNotFound(PresentationId),

    /// The referenced session does not exist.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// Agenda positions start at 1.
    #[error("agenda position must be >= 1, got {0}")]
    InvalidPosition(i64),

    /// Presentation titles must be non-empty.
    #[error("presentation title must not be empty")]
    EmptyTitle,

    /// The default session can never be edited or deleted.
    #[error("session {0} is the default session and cannot be modified or deleted")]
    DefaultSessionProtected(SessionId),

    /// A cascading operation completed some but not all of its writes.
    ///
    /// `completed` lists the presentations whose writes succeeded, in the
    /// order they were issued, so the caller can retry or reconcile.
    #[error("{operation} aborted after {} of {total} writes: {source}", .completed.len())]
    PartialFailure {
        /// Which multi-write sequence failed.
        operation: CascadeOperation,
        /// Presentations successfully written before the failure.
        completed: Vec<PresentationId>,
        /// Total writes the sequence would have issued.
        total: usize,
        /// The store error that stopped the sequence.
        #[source]
        source: StoreError,
    },

    /// Any other store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AgendaError {
    /// Whether this error means a referenced entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PresentationNotFound(_)
                | Self::SessionNotFound(_)
                | Self::Store(StoreError::PresentationNotFound(_) | StoreError::SessionNotFound(_))
        )
    }

    /// Whether this error is a caller mistake rejected before any mutation.
    #[must_use]
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPosition(_) | Self::EmptyTitle | Self::DefaultSessionProtected(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
