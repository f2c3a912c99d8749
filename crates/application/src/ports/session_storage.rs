//! Session-scoped key/value storage port.

/// Port for string storage that lives as long as the user's session.
///
/// Values survive a page reload but not a restart of the client.
pub trait SessionStorage: Send + Sync {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}
