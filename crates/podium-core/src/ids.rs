//! Branded ID newtypes.
//!
//! Every entity carries a string ID of the form `<prefix>_<uuid-v7>`, so IDs
//! are self-describing in logs and time-ordered by creation. The newtypes keep
//! a presentation ID from being passed where a session ID is expected; the
//! wire format stays a plain JSON string (`#[serde(transparent)]`).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! branded_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh prefixed UUID v7 ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!(concat!($prefix, "_{}"), Uuid::now_v7()))
            }

            /// Wrap an existing ID string (from storage or the wire).
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

branded_id!(
    /// Presentation identifier (`prs_` prefix).
    PresentationId,
    "prs"
);
branded_id!(
    /// Session identifier (`ses_` prefix).
    SessionId,
    "ses"
);
branded_id!(
    /// Conference identifier (`conf_` prefix).
    ConferenceId,
    "conf"
);
branded_id!(
    /// User identifier (`usr_` prefix), used for presenter sets.
    UserId,
    "usr"
);

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
