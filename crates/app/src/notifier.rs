//! Terminal notifier.

use freemate_application::ports::Notifier;

/// Prints notices to the terminal: successes on stdout, errors on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_success(&self, message: &str) {
        println!("{message}");
    }

    fn show_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn show_loading(&self, show: bool) {
        tracing::trace!(loading = show);
    }

    fn redirect(&self, destination: &str) {
        eprintln!("Please log in again ({destination}).");
    }
}
