//! FreeMate Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;

pub use adapters::{MemorySessionStorage, ReqwestTransport, SystemClock, TracingNotifier};
pub use config::{ConfigError, ConfigSource, load_config};
