//! User notification port.

/// Port through which the core talks to the user interface.
///
/// The core never renders anything itself; it reports outcomes here and the
/// adapter decides how to present them.
pub trait Notifier: Send + Sync {
    /// Shows a success message.
    fn show_success(&self, message: &str);

    /// Shows an error message.
    fn show_error(&self, message: &str);

    /// Shows or hides the loading indicator.
    fn show_loading(&self, show: bool);

    /// Navigates to `destination` (e.g. the login page).
    fn redirect(&self, destination: &str);
}
