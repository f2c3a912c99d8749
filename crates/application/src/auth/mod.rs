//! Authentication state for the FreeMate client.
//!
//! This module provides the in-memory session store with expiry tracking
//! and session-change notifications.

mod token_store;

pub use token_store::{NICKNAME_KEY, TokenStatus, TokenStore, token_preview};
