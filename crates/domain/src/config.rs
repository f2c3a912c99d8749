//! Client configuration.
//!
//! The configuration is an explicit value handed to constructors. Every field
//! carries a default so that a partial file (or no file at all) still yields a
//! complete configuration; defaults are applied once, at deserialization time.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default access-token lifetime when none is configured (one hour).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 60 * 60;

/// Top-level client configuration.
///
/// # Example
///
/// ```
/// use freemate_domain::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"baseUrl": "https://api.example.com"}"#).unwrap();
/// assert_eq!(config.base_url, "https://api.example.com");
/// assert_eq!(config.api_paths.auth.refresh, "/api/auth/refresh");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL prepended to relative request paths.
    pub base_url: String,
    /// Endpoint paths.
    pub api_paths: ApiPaths,
    /// Token lifetime settings.
    pub token: TokenSettings,
    /// Page destinations used for redirects.
    pub page_urls: PageUrls,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_paths: ApiPaths::default(),
            token: TokenSettings::default(),
            page_urls: PageUrls::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration pointing at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolves a request target against the base URL.
    ///
    /// Absolute URLs (anything starting with `http`) pass through unchanged;
    /// everything else is appended to the base URL verbatim.
    #[must_use]
    pub fn resolve_url(&self, target: &str) -> String {
        if target.starts_with("http") {
            target.to_string()
        } else {
            format!("{}{target}", self.base_url)
        }
    }
}

/// Endpoint paths grouped by area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiPaths {
    /// Authentication endpoints.
    pub auth: AuthPaths,
    /// Mail endpoints.
    pub mail: MailPaths,
}

/// Authentication endpoint paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthPaths {
    /// `POST` registration.
    pub register: String,
    /// `POST` login.
    pub login: String,
    /// `POST` access-token refresh.
    pub refresh: String,
    /// `GET` username duplication check.
    pub duplicate_username: String,
}

impl Default for AuthPaths {
    fn default() -> Self {
        Self {
            register: "/api/auth/register".to_string(),
            login: "/api/auth/login".to_string(),
            refresh: "/api/auth/refresh".to_string(),
            duplicate_username: "/api/auth/duplicate/username".to_string(),
        }
    }
}

/// Mail endpoint paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MailPaths {
    /// `GET` send verification mail.
    pub send: String,
    /// `GET` verification link target.
    pub verify: String,
}

impl Default for MailPaths {
    fn default() -> Self {
        Self {
            send: "/api/mail/send".to_string(),
            verify: "/api/mail/verify".to_string(),
        }
    }
}

/// Token lifetime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenSettings {
    /// Lifetime of an access token, in seconds.
    pub access_token_ttl_secs: u64,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
        }
    }
}

impl TokenSettings {
    /// Returns the access-token lifetime as a `chrono::Duration`.
    ///
    /// A zero lifetime is treated as unset and falls back to one hour.
    #[must_use]
    pub fn access_token_ttl(&self) -> Duration {
        let secs = if self.access_token_ttl_secs == 0 {
            DEFAULT_ACCESS_TOKEN_TTL_SECS
        } else {
            self.access_token_ttl_secs
        };
        i64::try_from(secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

/// Page destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageUrls {
    /// Home page.
    pub home: String,
    /// Login page; the redirect target after an unrecoverable refresh failure.
    pub login: String,
    /// Registration page.
    pub register: String,
}

impl Default for PageUrls {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/login".to_string(),
            register: "/register".to_string(),
        }
    }
}
