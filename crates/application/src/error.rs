//! Application error types

use freemate_domain::{DomainError, ErrorCode, ResponseBody};
use thiserror::Error;

use crate::ports::TransportError;

/// Fallback text when an error carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Errors returned by [`ApiClient`](crate::ApiClient) operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No HTTP response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Parsed error body.
        body: ResponseBody,
    },

    /// Authentication could not be recovered.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request payload could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(String),

    /// The response body could not be decoded.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, for [`ApiError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed error body, for [`ApiError::Status`].
    #[must_use]
    pub const fn body(&self) -> Option<&ResponseBody> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Message suitable for showing to a user.
    ///
    /// Uses the body's `message` (or `errorMessage`) for HTTP errors and the
    /// error's own text otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { body, .. } => body
                .message()
                .map_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string(), ToString::to_string),
            other => other.to_string(),
        }
    }

    /// Returns true if the server reported `code` for this error.
    #[must_use]
    pub fn has_code(&self, code: ErrorCode) -> bool {
        match self {
            Self::Status { body, .. } => code.is_reported_by(body),
            other => other.to_string().contains(code.as_str()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::Decode(error.to_string())
    }
}

/// Failures of the token refresh cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// There is no refresh token to exchange.
    #[error("no refresh token available")]
    NoRefreshToken,

    /// The refresh request failed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] Box<ApiError>),

    /// The refresh endpoint answered without an access token.
    #[error("refresh response did not contain an access token")]
    MalformedRefreshResponse,
}

/// Result type alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;
