//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod notifier;
mod session_storage;
mod transport;

pub use clock::Clock;
pub use notifier::Notifier;
pub use session_storage::SessionStorage;
pub use transport::{HttpTransport, TransportError};
