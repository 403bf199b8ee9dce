use crate::{Error, Result};
use chrono::Duration;
use keepsake_store::{DEFAULT_QUOTA_BYTES, Quota};
use keepsake_types::SessionId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. KEEPSAKE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.keepsake (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("KEEPSAKE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("keepsake"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".keepsake"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Where and how the log is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key rewritten on every append
    pub key: String,
    /// Key written once at teardown
    pub final_key: String,
    /// Byte budget of the store; 0 means unlimited
    pub quota_bytes: usize,
    /// Archive and clear the live log once it holds this many events.
    /// Not applied once persistence is degraded: memory then holds the only copy.
    pub max_events: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: "websiteAnalytics".to_string(),
            final_key: "finalAnalytics".to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            max_events: None,
        }
    }
}

impl StorageConfig {
    pub fn quota(&self) -> Quota {
        if self.quota_bytes == 0 {
            Quota::unlimited()
        } else {
            Quota::bytes(self.quota_bytes)
        }
    }

    /// Key for the `n`th archived chunk of a session. Shares the live key
    /// as prefix so prefix scans pick it up; the session id keeps chunks of
    /// different visits apart.
    pub fn archive_key(&self, session_id: &SessionId, n: usize) -> String {
        format!("{}_archive_{}_{}", self.key, session_id, n)
    }
}

/// Presentation timing; none of these are load-bearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub scroll_debounce_ms: u64,
    pub autoplay_interval_ms: u64,
    pub autoplay_pause_ms: u64,
    pub time_update_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: 100,
            autoplay_interval_ms: 4000,
            autoplay_pause_ms: 8000,
            time_update_interval_ms: 30_000,
        }
    }
}

impl TimingConfig {
    pub fn scroll_debounce(&self) -> Duration {
        millis(self.scroll_debounce_ms)
    }

    pub fn autoplay_interval(&self) -> Duration {
        millis(self.autoplay_interval_ms)
    }

    pub fn autoplay_pause(&self) -> Duration {
        millis(self.autoplay_pause_ms)
    }

    pub fn time_update_interval(&self) -> Duration {
        millis(self.time_update_interval_ms)
    }
}

fn millis(ms: u64) -> Duration {
    Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX / 1_000_000))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Fraction of a section that must be visible to count as viewed
    pub section_view_threshold: f64,
    /// Characters of element text kept on click events
    pub click_text_limit: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            section_view_threshold: 0.5,
            click_text_limit: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.key.is_empty() || self.storage.final_key.is_empty() {
            return Err(Error::Config("storage keys must not be empty".to_string()));
        }

        if self.storage.final_key.starts_with(&self.storage.key) {
            return Err(Error::Config(format!(
                "final_key '{}' must not start with key '{}'",
                self.storage.final_key, self.storage.key
            )));
        }

        if self.storage.max_events == Some(0) {
            return Err(Error::Config("max_events must be at least 1".to_string()));
        }

        let threshold = self.tracking.section_view_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "section_view_threshold must be within 0.0..=1.0, got {}",
                threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.storage.key, "websiteAnalytics");
        assert_eq!(config.storage.final_key, "finalAnalytics");
        assert_eq!(config.timing.scroll_debounce_ms, 100);
        assert_eq!(config.timing.time_update_interval_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.storage.max_events = Some(500);
        config.timing.autoplay_interval_ms = 6000;
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[timing]\nscroll_debounce_ms = 250\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.timing.scroll_debounce_ms, 250);
        assert_eq!(loaded.timing.autoplay_pause_ms, 8000);
        assert_eq!(loaded.storage, StorageConfig::default());

        Ok(())
    }

    #[test]
    fn test_load_missing_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = Config::load_from(&temp_dir.path().join("nope.toml"))?;
        assert_eq!(loaded, Config::default());
        Ok(())
    }

    #[test]
    fn test_validate_rejects_overlapping_keys() {
        let mut config = Config::default();
        config.storage.final_key = "websiteAnalyticsFinal".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_quota_zero_is_unlimited() {
        let storage = StorageConfig {
            quota_bytes: 0,
            ..StorageConfig::default()
        };
        assert_eq!(storage.quota().limit(), None);
        let session = SessionId::from_parts(1_700_000_000_000, "abc123xyz");
        assert_eq!(
            storage.archive_key(&session, 2),
            "websiteAnalytics_archive_session_1700000000000_abc123xyz_2"
        );
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/tmp/keepsake"), PathBuf::from("/tmp/keepsake"));
    }
}
