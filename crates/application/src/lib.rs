//! FreeMate Application - Session handling and use cases
//!
//! This crate holds the client core: the token store, the authenticated
//! [`ApiClient`] with its refresh-and-retry cycle, and the registration and
//! login use cases. All I/O goes through the traits in [`ports`].

pub mod auth;
pub mod client;
pub mod error;
pub mod messages;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

pub use auth::{TokenStatus, TokenStore};
pub use client::{ApiClient, AuthMode};
pub use error::{ApiError, ApiResult, AuthError, UNKNOWN_ERROR_MESSAGE};
pub use use_cases::{AuthService, LoadingGuard, RegistrationService};
