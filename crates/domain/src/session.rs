//! Authentication session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access/refresh token pair as returned by the login and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived credential for API calls.
    pub access_token: String,
    /// Long-lived credential used to obtain new access tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Creates a token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: Some(refresh_token.into()),
        }
    }
}

/// In-memory authentication state.
///
/// A session is either empty (logged out) or holds an access token with its
/// expiry and, usually, a refresh token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Current access token.
    pub access_token: Option<String>,
    /// Current refresh token.
    pub refresh_token: Option<String>,
    /// When the access token stops being usable.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Creates a session from a token pair expiring at `expires_at`.
    #[must_use]
    pub fn from_tokens(tokens: TokenPair, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: Some(tokens.access_token),
            refresh_token: tokens.refresh_token,
            expires_at: Some(expires_at),
        }
    }

    /// Returns true when an access token is present and `now` is before its expiry.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_some() && self.expires_at.is_some_and(|expires_at| now < expires_at)
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.expires_at.is_none()
    }
}

/// Session state changes observable by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Tokens were saved after a successful login.
    LoggedIn,
    /// The session was cleared (logout or unrecoverable refresh failure).
    LoggedOut,
}
