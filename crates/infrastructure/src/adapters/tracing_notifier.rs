//! Notifier that reports through `tracing`.

use freemate_application::ports::Notifier;
use tracing::{debug, info, warn};

/// [`Notifier`] for headless use: every notice becomes a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_success(&self, message: &str) {
        info!(target: "freemate::notice", "{message}");
    }

    fn show_error(&self, message: &str) {
        warn!(target: "freemate::notice", "{message}");
    }

    fn show_loading(&self, show: bool) {
        debug!(target: "freemate::notice", loading = show);
    }

    fn redirect(&self, destination: &str) {
        info!(target: "freemate::notice", destination, "Redirect requested");
    }
}
