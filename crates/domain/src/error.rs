//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while decoding values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
