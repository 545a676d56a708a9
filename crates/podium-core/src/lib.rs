//! # podium-core
//!
//! Foundation types for the Podium conference-feedback agenda engine.
//!
//! This crate provides the shared vocabulary the other Podium crates depend on:
//!
//! - **Branded IDs**: [`ids::PresentationId`], [`ids::SessionId`],
//!   [`ids::ConferenceId`], [`ids::UserId`] as newtypes over prefixed UUID v7 strings
//! - **Presentations**: [`presentation::Presentation`] and [`presentation::PresentationStatus`]
//! - **Sessions**: [`session::Session`] and the reserved [`session::DEFAULT_SESSION_NAME`]
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `podium-agenda`.

#![deny(unsafe_code)]

pub mod ids;
pub mod presentation;
pub mod session;

pub use ids::{ConferenceId, PresentationId, SessionId, UserId};
pub use presentation::{Presentation, PresentationStatus};
pub use session::{DEFAULT_SESSION_NAME, Session};
