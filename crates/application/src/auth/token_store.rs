//! In-memory token storage with expiry tracking.
//!
//! The store owns the one mutable [`Session`] of the client. Every mutation
//! goes through `save`, `update_access_token` or `clear`, each of which
//! replaces the record under a single write lock.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use freemate_domain::{Session, SessionEvent, TokenPair, TokenSettings};
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info};

use crate::ports::{Clock, SessionStorage};

/// Session-storage key holding the logged-in user's nickname.
pub const NICKNAME_KEY: &str = "userNickname";

/// Capacity of the session event channel.
const EVENT_CAPACITY: usize = 16;

/// Returns a loggable preview of a token (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    match token.char_indices().nth(8) {
        Some((idx, _)) if token.len() > 12 => format!("{}...", &token[..idx]),
        _ => token.to_string(),
    }
}

/// Thread-safe in-memory session store.
pub struct TokenStore {
    session: RwLock<Session>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    storage: Arc<dyn SessionStorage>,
    events: broadcast::Sender<SessionEvent>,
}

impl TokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(
        settings: &TokenSettings,
        clock: Arc<dyn Clock>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            session: RwLock::new(Session::empty()),
            ttl: settings.access_token_ttl(),
            clock,
            storage,
            events,
        }
    }

    /// Subscribes to login/logout notifications.
    ///
    /// Events are fire-and-forget: the store never waits on subscribers and
    /// emitting with nobody listening is not an error.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Stores a freshly issued token pair and the user's nickname.
    pub async fn save(&self, tokens: TokenPair, nickname: &str) {
        let expires_at = self.expiry_from_now();
        debug!(
            access_token = %token_preview(&tokens.access_token),
            %expires_at,
            "Saving session tokens"
        );
        *self.session.write().await = Session::from_tokens(tokens, expires_at);

        self.storage.set(NICKNAME_KEY, nickname);
        self.emit(SessionEvent::LoggedIn);
    }

    /// Current access token, valid or not.
    pub async fn access_token(&self) -> Option<String> {
        self.session.read().await.access_token.clone()
    }

    /// Current refresh token.
    pub async fn refresh_token(&self) -> Option<String> {
        self.session.read().await.refresh_token.clone()
    }

    /// Access token, only if the session is currently valid.
    pub async fn valid_access_token(&self) -> Option<String> {
        let now = self.clock.now();
        let session = self.session.read().await;
        if session.is_valid(now) {
            session.access_token.clone()
        } else {
            None
        }
    }

    /// Returns true when an access token is present and not yet expired.
    pub async fn is_valid(&self) -> bool {
        let now = self.clock.now();
        self.session.read().await.is_valid(now)
    }

    /// Replaces the access token and restarts its lifetime.
    ///
    /// The refresh token is left untouched.
    pub async fn update_access_token(&self, access_token: String) {
        let expires_at = self.expiry_from_now();
        let mut session = self.session.write().await;
        session.access_token = Some(access_token);
        session.expires_at = Some(expires_at);
    }

    /// Forgets every token and the stored nickname.
    pub async fn clear(&self) {
        *self.session.write().await = Session::empty();
        self.storage.remove(NICKNAME_KEY);
        info!("Session cleared");
        self.emit(SessionEvent::LoggedOut);
    }

    /// Nickname saved at login.
    #[must_use]
    pub fn nickname(&self) -> Option<String> {
        self.storage.get(NICKNAME_KEY)
    }

    /// Copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Get token status for display.
    pub async fn status(&self) -> TokenStatus {
        let now = self.clock.now();
        let session = self.session.read().await;
        match (&session.access_token, session.expires_at) {
            (Some(_), Some(expires_at)) if now < expires_at => TokenStatus::Valid {
                seconds_remaining: (expires_at - now).num_seconds(),
            },
            (Some(_), _) => TokenStatus::Expired {
                can_refresh: session.refresh_token.is_some(),
            },
            (None, _) => TokenStatus::NotAuthenticated,
        }
    }

    fn expiry_from_now(&self) -> DateTime<Utc> {
        self.clock
            .now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("ttl", &self.ttl)
            .field("subscribers", &self.events.receiver_count())
            .finish_non_exhaustive()
    }
}

/// Status of the session for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No access token is held.
    NotAuthenticated,
    /// Access token is usable.
    Valid {
        /// Seconds until expiry.
        seconds_remaining: i64,
    },
    /// Access token has expired.
    Expired {
        /// Whether a refresh token is available.
        can_refresh: bool,
    },
}

impl TokenStatus {
    /// Returns true if the access token is usable.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not authenticated".to_string(),
            Self::Valid { seconds_remaining } => {
                if *seconds_remaining > 3600 {
                    format!("Valid for {} hours", seconds_remaining / 3600)
                } else if *seconds_remaining > 60 {
                    format!("Valid for {} minutes", seconds_remaining / 60)
                } else {
                    format!("Valid for {seconds_remaining} seconds")
                }
            }
            Self::Expired { can_refresh: true } => "Expired (can refresh)".to_string(),
            Self::Expired { can_refresh: false } => "Expired".to_string(),
        }
    }
}
