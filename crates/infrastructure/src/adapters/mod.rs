//! Port implementations.

mod memory_session_storage;
mod reqwest_transport;
mod system_clock;
mod tracing_notifier;

pub use memory_session_storage::MemorySessionStorage;
pub use reqwest_transport::ReqwestTransport;
pub use system_clock::SystemClock;
pub use tracing_notifier::TracingNotifier;
