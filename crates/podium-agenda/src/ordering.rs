//! The ordering engine — keeps agenda positions unique within a session.
//!
//! Positions are edited manually through a UI, so the engine favors
//! user-predictable placement over auto-increment: a new entry lands exactly
//! where the user put it and everything after slides down by one. All
//! multi-write sequences order the displacing write before the displaced one
//! and surface [`AgendaError::PartialFailure`] instead of pretending
//! atomicity — there is no cross-call transaction (see `store`).

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, instrument};

use podium_core::{
    ConferenceId, Presentation, PresentationId, PresentationStatus, SessionId, UserId,
};

use crate::errors::{AgendaError, CascadeOperation, Result};
use crate::store::{CreatePresentation, PresentationPatch, PresentationStore, SessionStore};

/// Request to insert a presentation at a desired position.
#[derive(Clone, Debug)]
pub struct InsertPresentation {
    /// Presentation title (non-empty).
    pub title: String,
    /// Owning conference.
    pub conference_id: ConferenceId,
    /// Target session.
    pub session_id: SessionId,
    /// Where the caller wants the presentation (>= 1; clamped to the
    /// session's next free slot when beyond it).
    pub desired_position: i64,
    /// Presenters.
    pub presenter_ids: Vec<UserId>,
    /// Rating visibility.
    pub status: PresentationStatus,
}

/// Outcome of resolving an insert position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertPlacement {
    /// The position the new presentation should be created at.
    pub effective_position: i64,
    /// Presentations shifted up by one to vacate that position, in the
    /// order their writes were issued (highest position first).
    pub shifted: Vec<PresentationId>,
}

/// The first position after a session's current maximum (1 when empty).
pub(crate) fn next_append_position(existing: &[Presentation]) -> i64 {
    existing
        .iter()
        .map(|p| p.agenda_position)
        .max()
        .unwrap_or(0)
        + 1
}

/// Maintains per-session position uniqueness on insert and move.
pub struct OrderingEngine<'a, P: ?Sized, S: ?Sized> {
    presentations: &'a P,
    sessions: &'a S,
}

impl<'a, P, S> OrderingEngine<'a, P, S>
where
    P: PresentationStore + ?Sized,
    S: SessionStore + ?Sized,
{
    /// Create an engine over the given stores.
    pub fn new(presentations: &'a P, sessions: &'a S) -> Self {
        Self {
            presentations,
            sessions,
        }
    }

    /// Resolve a desired insert position, shifting occupants if needed.
    ///
    /// - A position beyond the session's natural next slot is clamped to
    ///   `max + 1` (an empty session always resolves to 1).
    /// - If the resolved slot is occupied, the contiguous run of occupied
    ///   positions starting there shifts up by one, highest first. A
    ///   pre-existing gap stops the shift; entries beyond it stay put.
    ///
    /// Nothing outside the target session is touched. The caller creates the
    /// presentation at the returned position.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub fn place_on_insert(
        &self,
        session_id: &SessionId,
        desired_position: i64,
    ) -> Result<InsertPlacement> {
        if desired_position < 1 {
            return Err(AgendaError::InvalidPosition(desired_position));
        }
        let _ = self
            .sessions
            .get(session_id)?
            .ok_or_else(|| AgendaError::SessionNotFound(session_id.clone()))?;

        let existing = self.presentations.list_by_session(session_id)?;
        let occupied: BTreeSet<i64> = existing.iter().map(|p| p.agenda_position).collect();
        let max = occupied.iter().next_back().copied().unwrap_or(0);
        let effective = desired_position.min(max + 1);

        if !occupied.contains(&effective) {
            debug!(effective, "insert slot free, no shift");
            return Ok(InsertPlacement {
                effective_position: effective,
                shifted: Vec::new(),
            });
        }

        // The maximal contiguous occupied run starting at the effective
        // position; the first gap ends it.
        let mut run_end = effective;
        while occupied.contains(&(run_end + 1)) {
            run_end += 1;
        }
        let by_position: HashMap<i64, &Presentation> =
            existing.iter().map(|p| (p.agenda_position, p)).collect();

        let total = usize::try_from(run_end - effective + 1).unwrap_or(usize::MAX);
        let mut shifted = Vec::with_capacity(total);
        // Highest first, so no two entries ever hold the same position
        // between writes.
        for position in (effective..=run_end).rev() {
            let occupant = by_position[&position];
            match self
                .presentations
                .update(&occupant.id, &PresentationPatch::position(position + 1))
            {
                Ok(_) => shifted.push(occupant.id.clone()),
                Err(source) => {
                    return Err(AgendaError::PartialFailure {
                        operation: CascadeOperation::ShiftOnInsert,
                        completed: shifted,
                        total,
                        source,
                    });
                }
            }
        }

        debug!(effective, shifted = shifted.len(), "insert slot vacated");
        Ok(InsertPlacement {
            effective_position: effective,
            shifted,
        })
    }

    /// Insert a presentation: resolve its position, then create the record.
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    pub fn insert(&self, request: InsertPresentation) -> Result<Presentation> {
        if request.title.trim().is_empty() {
            return Err(AgendaError::EmptyTitle);
        }
        let placement = self.place_on_insert(&request.session_id, request.desired_position)?;
        match self.presentations.create(CreatePresentation {
            title: request.title,
            conference_id: request.conference_id,
            session_id: request.session_id,
            agenda_position: placement.effective_position,
            presenter_ids: request.presenter_ids,
            status: request.status,
        }) {
            Ok(presentation) => {
                debug!(id = %presentation.id, position = placement.effective_position, "presentation inserted");
                Ok(presentation)
            }
            Err(source) if placement.shifted.is_empty() => Err(source.into()),
            // The shift already ran; report it rather than hiding the moved rows.
            Err(source) => Err(AgendaError::PartialFailure {
                operation: CascadeOperation::ShiftOnInsert,
                total: placement.shifted.len() + 1,
                completed: placement.shifted,
                source,
            }),
        }
    }

    /// Move a presentation to a (session, position) slot.
    ///
    /// If the slot is free the move is a single update. If another
    /// presentation holds it, that occupant is first assigned the moving
    /// presentation's old position — a true swap when both are in the same
    /// session. When the sessions differ, the occupant keeps its (target)
    /// session and only takes over the vacated position number; the old
    /// session is left with a gap, which is permitted. The displacing write
    /// is issued before the moving one.
    ///
    /// No clamping applies on move.
    #[instrument(skip(self), fields(id = %presentation_id, target = %target_session_id))]
    pub fn place_on_move(
        &self,
        presentation_id: &PresentationId,
        target_session_id: &SessionId,
        new_position: i64,
    ) -> Result<Presentation> {
        if new_position < 1 {
            return Err(AgendaError::InvalidPosition(new_position));
        }
        let moving = self
            .presentations
            .get(presentation_id)?
            .ok_or_else(|| AgendaError::PresentationNotFound(presentation_id.clone()))?;
        let _ = self
            .sessions
            .get(target_session_id)?
            .ok_or_else(|| AgendaError::SessionNotFound(target_session_id.clone()))?;

        if moving.session_id == *target_session_id && moving.agenda_position == new_position {
            debug!("move is a no-op");
            return Ok(moving);
        }

        let occupants = self.presentations.list_by_session(target_session_id)?;
        let conflict = occupants
            .into_iter()
            .find(|p| p.agenda_position == new_position && p.id != *presentation_id);

        if let Some(displaced) = conflict {
            // Displacing write first. Failure here leaves everything untouched.
            let _ = self
                .presentations
                .update(&displaced.id, &PresentationPatch::position(moving.agenda_position))?;
            match self.presentations.update(
                presentation_id,
                &PresentationPatch::placement(target_session_id.clone(), new_position),
            ) {
                Ok(updated) => {
                    debug!(displaced = %displaced.id, "moved with displacement");
                    Ok(updated)
                }
                Err(source) => Err(AgendaError::PartialFailure {
                    operation: CascadeOperation::SwapOnMove,
                    completed: vec![displaced.id],
                    total: 2,
                    source,
                }),
            }
        } else {
            let updated = self.presentations.update(
                presentation_id,
                &PresentationPatch::placement(target_session_id.clone(), new_position),
            )?;
            debug!(position = new_position, "moved to free slot");
            Ok(updated)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
