//! Response types
//!
//! [`RawResponse`] is what the transport hands back; [`ResponseBody`] is the
//! body after classification by content type.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// An undecoded HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in the order received.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a JSON response from a value.
    #[must_use]
    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(
            status,
            vec![("content-type".to_string(), "application/json".to_string())],
            value.to_string().into_bytes(),
        )
    }

    /// Creates a plain-text response.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(
            status,
            vec![("content-type".to_string(), "text/plain;charset=UTF-8".to_string())],
            body.into().into_bytes(),
        )
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Content-Type header value, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true when the declared content type is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// A response body classified by its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Parsed JSON document.
    Json(Value),
    /// Anything that was not declared as JSON.
    Text(String),
}

impl ResponseBody {
    /// Classifies and parses the body of `response`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnexpectedBody`] when the response declares JSON
    /// but the body does not parse.
    pub fn parse(response: &RawResponse) -> DomainResult<Self> {
        if response.is_json() {
            serde_json::from_slice(&response.body)
                .map(Self::Json)
                .map_err(|e| DomainError::UnexpectedBody(format!("invalid JSON: {e}")))
        } else {
            Ok(Self::Text(
                String::from_utf8_lossy(&response.body).into_owned(),
            ))
        }
    }

    /// Returns the JSON value, if this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is a text body.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Returns a top-level string field of a JSON object body.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.as_json()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
    }

    /// Human-readable error message carried by an error body.
    ///
    /// Looks at `message` first, then the server's `errorMessage`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.str_field("message")
            .or_else(|| self.str_field("errorMessage"))
    }

    /// Structured error code carried by an error body (`errorCode` or `code`).
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.str_field("errorCode").or_else(|| self.str_field("code"))
    }

    /// Interprets the body as a boolean (`true`/`false` in JSON or text).
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Json(value) => value.as_bool(),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Decodes a JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnexpectedBody`] for text bodies or when the JSON
    /// does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> DomainResult<T> {
        match self {
            Self::Json(value) => T::deserialize(value)
                .map_err(|e| DomainError::UnexpectedBody(e.to_string())),
            Self::Text(_) => Err(DomainError::UnexpectedBody(
                "expected a JSON body".to_string(),
            )),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}
