use crate::error::Result;
use std::rc::Rc;

/// Abstract interface for the local key-value store.
///
/// This is the durable half of the browser's local storage: string keys to
/// string values. Methods take `&self`; implementations handle their own
/// interior mutability since the shelf is single-threaded.
pub trait StorageBackend {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    /// MUST NOT leave a partially written value visible to later reads.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
