use crate::errors::CoreError;

/// String key-value storage with browser `localStorage` semantics.
///
/// The dashboard keeps exactly one entry in it (the theme preference), read
/// once at page load and written on every toggle. Implementations exist for
/// memory, a JSON file on disk, and the browser itself (wasm32).
pub trait PreferenceStore {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Value stored under `key`, or `None` if nothing was ever written.
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Forget `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), CoreError>;
}
