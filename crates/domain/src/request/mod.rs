//! Outgoing request types.

mod method;
mod query;

pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};

/// Name of the header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";

/// Name of the content-type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully resolved request handed to the transport.
///
/// By the time a request reaches this shape its URL is absolute, its query
/// string is encoded and its JSON body is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Serialized request body.
    pub body: Option<String>,
}

impl OutgoingRequest {
    /// Creates a request with the JSON content-type header already set.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())],
            body: None,
        }
    }

    /// Sets the serialized body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets `Authorization: Bearer <token>`, replacing any previous value.
    pub fn set_bearer(&mut self, token: &str) {
        self.remove_header(AUTHORIZATION);
        self.headers
            .push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
    }

    /// Removes every header named `name` (case-insensitive).
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    }

    /// Returns the first value of header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
