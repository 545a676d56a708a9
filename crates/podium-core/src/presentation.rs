//! The [`Presentation`] type — a rated talk slot on a conference agenda.

use serde::{Deserialize, Serialize};

use crate::ids::{ConferenceId, PresentationId, SessionId, UserId};

/// Whether a presentation is open for rating by end users.
///
/// Not consulted by the ordering logic; carried through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresentationStatus {
    /// Visible and ratable.
    #[default]
    Active,
    /// Hidden from end users.
    Inactive,
}

impl PresentationStatus {
    /// Canonical storage/wire form (`ACTIVE` / `INACTIVE`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Parse the canonical form. Returns `None` for anything else.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// A presentation on a conference agenda.
///
/// `agenda_position` is a positive integer unique *within* the owning
/// session, not globally. Positions may have gaps; the ordering engine is
/// the only writer that changes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Unique presentation ID (immutable).
    pub id: PresentationId,
    /// Presentation title (non-empty).
    pub title: String,
    /// Owning conference (immutable after creation).
    pub conference_id: ConferenceId,
    /// Owning session (mutable — presentations can be reassigned).
    pub session_id: SessionId,
    /// Rank within the session; positive, unique per session.
    pub agenda_position: i64,
    /// Presenters (set semantics, no ordering).
    #[serde(default)]
    pub presenter_ids: Vec<UserId>,
    /// Rating visibility.
    pub status: PresentationStatus,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Presentation {
        Presentation {
            id: PresentationId::new("prs_1"),
            title: "Opening Keynote".to_string(),
            conference_id: ConferenceId::new("conf_1"),
            session_id: SessionId::new("ses_1"),
            agenda_position: 1,
            presenter_ids: vec![UserId::new("usr_1")],
            status: PresentationStatus::Active,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["agendaPosition"], 1);
        assert_eq!(json["sessionId"], "ses_1");
        assert_eq!(json["status"], "ACTIVE");
    }

    #[test]
    fn round_trips() {
        let p = sample();
        let json = serde_json::to_string(&p).unwrap();
        let back: Presentation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn status_string_round_trip() {
        assert_eq!(PresentationStatus::Active.as_str(), "ACTIVE");
        assert_eq!(PresentationStatus::parse("INACTIVE"), Some(PresentationStatus::Inactive));
        assert_eq!(PresentationStatus::parse("active"), None);
    }

    #[test]
    fn presenter_ids_default_to_empty() {
        let json = r#"{
            "id": "prs_1",
            "title": "T",
            "conferenceId": "conf_1",
            "sessionId": "ses_1",
            "agendaPosition": 3,
            "status": "INACTIVE",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;
        let p: Presentation = serde_json::from_str(json).unwrap();
        assert!(p.presenter_ids.is_empty());
        assert_eq!(p.status, PresentationStatus::Inactive);
    }
}
