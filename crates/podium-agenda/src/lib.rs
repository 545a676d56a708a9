//! # podium-agenda
//!
//! Agenda position management for Podium conferences.
//!
//! Responsibilities:
//!
//! - **Ordering engine**: keeps `agenda_position` unique within a session on
//!   insert (contiguous shift, clamping) and move (free-slot move or swap)
//! - **Session lifecycle**: session deletion with cascade or
//!   migrate-to-default handling of the session's presentations, plus
//!   default-session protection and repair
//! - **Stores**: `PresentationStore`/`SessionStore` traits with a pooled
//!   `SQLite` implementation (repository pattern) and an in-memory one
//! - **Errors**: not-found / invalid-operation / partial-failure taxonomy,
//!   with partial failures naming exactly which writes landed
//!
//! The engine issues plain sequential writes, no cross-record transaction:
//! displacing writes always go first, so an interrupted sequence never leaves
//! two presentations on the same position.

#![deny(unsafe_code)]

pub mod errors;
pub mod lifecycle;
pub mod ordering;
pub mod store;

pub use errors::{AgendaError, CascadeOperation, Result, StoreError};
pub use lifecycle::{DeleteSessionResult, SessionLifecycle};
pub use ordering::{InsertPlacement, InsertPresentation, OrderingEngine};
pub use store::memory::MemoryStore;
pub use store::sqlite::SqliteStore;
pub use store::{
    CreatePresentation, CreateSession, PresentationPatch, PresentationStore, SessionStore,
};
