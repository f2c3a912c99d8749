//! Application use cases (business logic orchestration).

mod auth;
mod loading;
mod registration;

pub use auth::AuthService;
pub use loading::LoadingGuard;
pub use registration::{RegistrationService, VERIFIED_EMAILS_KEY};

use freemate_domain::ErrorCode;

use crate::error::ApiError;

/// Returns the message paired with the first code `error` reports, if any.
fn message_for(error: &ApiError, table: &[(ErrorCode, &'static str)]) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| error.has_code(*code))
        .map(|(_, message)| *message)
}
