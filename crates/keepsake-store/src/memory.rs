use std::collections::BTreeMap;

use crate::{Error, KeyValueStore, Quota, Result};

/// In-process store; what a page gets when durable storage is not wired up.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Quota,
    disabled: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: Quota) -> Self {
        Self {
            quota,
            ..Self::default()
        }
    }

    /// A store that rejects every operation, like local storage under a
    /// blocking privacy policy.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure_enabled(&self) -> Result<()> {
        if self.disabled {
            return Err(Error::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_enabled()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_enabled()?;
        let used = self.used_bytes()?;
        let existing = self.entries.get(key).map(String::len);
        self.quota.check(used, key, existing, value)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.ensure_enabled()?;
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.ensure_enabled()?;
        Ok(self.entries.keys().cloned().collect())
    }

    fn used_bytes(&self) -> Result<usize> {
        self.ensure_enabled()?;
        Ok(self.entries.iter().map(|(k, v)| k.len() + v.len()).sum())
    }
}
