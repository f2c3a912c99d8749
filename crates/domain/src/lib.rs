//! FreeMate Domain - Core client types
//!
//! This crate defines the domain model for the FreeMate registration and
//! authentication client. All types here are pure Rust with no I/O.

pub mod config;
pub mod error;
pub mod error_code;
pub mod format;
pub mod login;
pub mod registration;
pub mod request;
pub mod response;
pub mod session;
pub mod validation;

pub use config::{ApiPaths, AuthPaths, ClientConfig, MailPaths, PageUrls, TokenSettings};
pub use error::{DomainError, DomainResult};
pub use error_code::ErrorCode;
pub use format::{DEFAULT_DATE_FORMAT, format_date};
pub use login::{LoginRequest, LoginResponse};
pub use registration::{Gender, RegistrationForm, RegistrationRequest, calculate_age};
pub use request::{HttpMethod, OutgoingRequest, QueryParam, QueryParams};
pub use response::{RawResponse, ResponseBody};
pub use session::{Session, SessionEvent, TokenPair};
pub use validation::{validate_email, validate_password};
