//! Scoped loading indicator.

use crate::ports::Notifier;

/// Shows the loading indicator while alive and hides it on drop.
///
/// Holding the guard across an `.await` keeps the indicator up for the
/// whole call, whichever way the call exits.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> LoadingGuard<'a> {
    /// Shows the indicator.
    pub fn show(notifier: &'a dyn Notifier) -> Self {
        notifier.show_loading(true);
        Self { notifier }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.notifier.show_loading(false);
    }
}
