// Durable key-value storage
// Browser local-storage semantics: string keys, string values, overwrite on
// write, a byte quota, and no transactions across keys.

mod error;
mod memory;
mod quota;
mod schema;
mod sqlite;

// Public API
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use quota::{DEFAULT_QUOTA_BYTES, Quota};
pub use sqlite::SqliteStore;

/// Capability the logger persists through.
///
/// Implementations are single-writer; nothing here is expected to be shared
/// across threads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite `key`. Fails with [`Error::QuotaExceeded`] when the write
    /// would push the store past its quota; the previous value is kept then.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// All keys, ascending.
    fn keys(&self) -> Result<Vec<String>>;

    /// Bytes currently used by keys and values.
    fn used_bytes(&self) -> Result<usize>;

    /// Keys starting with `prefix`, ascending.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect())
    }

    /// Remove every key starting with `prefix`, returning how many went away.
    fn remove_prefixed(&mut self, prefix: &str) -> Result<usize> {
        let keys = self.keys_with_prefix(prefix)?;
        for key in &keys {
            self.remove(key)?;
        }
        Ok(keys.len())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn used_bytes(&self) -> Result<usize> {
        (**self).used_bytes()
    }
}
