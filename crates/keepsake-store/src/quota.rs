use crate::{Error, Result};

/// Typical per-origin local-storage allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Byte budget over keys + values (UTF-8 lengths).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    limit: Option<usize>,
}

impl Default for Quota {
    fn default() -> Self {
        Self::bytes(DEFAULT_QUOTA_BYTES)
    }
}

impl Quota {
    pub fn bytes(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }

    pub fn unlimited() -> Self {
        Self { limit: None }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Check that replacing `key`'s current entry (`existing` bytes of value,
    /// if any) with `value` stays within budget given `used` bytes in total.
    pub fn check(&self, used: usize, key: &str, existing: Option<usize>, value: &str) -> Result<()> {
        let Some(limit) = self.limit else {
            return Ok(());
        };

        let freed = existing.map(|len| len + key.len()).unwrap_or(0);
        let needed = used.saturating_sub(freed) + key.len() + value.len();

        if needed > limit {
            return Err(Error::QuotaExceeded {
                key: key.to_string(),
                needed,
                limit,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_frees_previous_value() {
        let quota = Quota::bytes(10);
        // "k" + "12345678" = 9 bytes already used, rewriting with 9 value bytes = 10
        assert!(quota.check(9, "k", Some(8), "123456789").is_ok());
        assert!(quota.check(9, "k", Some(8), "1234567890").is_err());
    }

    #[test]
    fn test_unlimited_never_fails() {
        assert!(Quota::unlimited().check(usize::MAX - 1, "k", None, "v").is_ok());
    }
}
