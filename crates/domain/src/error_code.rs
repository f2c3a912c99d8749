//! Server error codes recognised by the client.
//!
//! The server reports validation failures with a code such as
//! `DUPLICATE_EMAIL`. Newer responses carry it in a structured `errorCode`
//! field; older ones only embed it in the message text, so matching falls back
//! to a substring search over the message fields.

use std::fmt;

use crate::response::ResponseBody;

/// Body fields searched for a code name when no structured code is present.
const MESSAGE_FIELDS: [&str; 2] = ["message", "errorMessage"];

/// Known server error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E-mail is already registered.
    DuplicateEmail,
    /// E-mail address is malformed or undeliverable.
    InvalidEmail,
    /// Nickname is already in use.
    DuplicateNickname,
    /// Username is already in use.
    DuplicateUsername,
    /// Age is outside the accepted range.
    InvalidAge,
}

impl ErrorCode {
    /// Returns the wire name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::DuplicateNickname => "DUPLICATE_NICKNAME",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::InvalidAge => "INVALID_AGE",
        }
    }

    /// Returns true if `body` reports this code.
    ///
    /// A structured code, when present, is authoritative. Otherwise the code
    /// name is searched for in both `message` and `errorMessage`.
    #[must_use]
    pub fn is_reported_by(self, body: &ResponseBody) -> bool {
        match body.error_code() {
            Some(code) => code == self.as_str(),
            None => MESSAGE_FIELDS
                .iter()
                .filter_map(|field| body.str_field(field))
                .any(|text| text.contains(self.as_str())),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
