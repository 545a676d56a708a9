//! The [`Session`] type — a named block of presentations within a conference.

use serde::{Deserialize, Serialize};

use crate::ids::{ConferenceId, SessionId};

/// Reserved name of the default session.
///
/// Every conference has exactly one session with this name. It is created
/// together with the conference, receives presentations migrated out of
/// deleted sessions, and can never be edited or deleted.
pub const DEFAULT_SESSION_NAME: &str = "presentations";

/// A session grouping presentations inside a conference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session ID.
    pub id: SessionId,
    /// Owning conference (immutable).
    pub conference_id: ConferenceId,
    /// Human ordering of sessions; unique within a conference.
    pub session_number: i64,
    /// Display name. [`DEFAULT_SESSION_NAME`] marks the default session.
    pub session_name: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

impl Session {
    /// Whether this is the conference's reserved default session.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.session_name == DEFAULT_SESSION_NAME
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str) -> Session {
        Session {
            id: SessionId::new("ses_1"),
            conference_id: ConferenceId::new("conf_1"),
            session_number: 1,
            session_name: name.to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn default_session_is_detected_by_name() {
        assert!(session("presentations").is_default());
        assert!(!session("Morning Talks").is_default());
        // Name matching is exact — case and whitespace matter.
        assert!(!session("Presentations").is_default());
        assert!(!session(" presentations").is_default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(session("Morning Talks")).unwrap();
        assert_eq!(json["sessionNumber"], 1);
        assert_eq!(json["sessionName"], "Morning Talks");
        assert_eq!(json["conferenceId"], "conf_1");
    }
}
