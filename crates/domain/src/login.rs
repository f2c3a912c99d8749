//! Login payloads.

use serde::{Deserialize, Serialize};

use crate::session::TokenPair;

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Display name of the logged-in user.
    #[serde(default)]
    pub nickname: String,
}

impl LoginResponse {
    /// Splits the response into the token pair and the nickname.
    #[must_use]
    pub fn into_parts(self) -> (TokenPair, String) {
        (
            TokenPair {
                access_token: self.access_token,
                refresh_token: self.refresh_token,
            },
            self.nickname,
        )
    }
}
