use anyhow::{Context, Result};
use keepsake_store::SqliteStore;
use keepsake_tracker::{Config, resolve_data_dir};
use std::path::{Path, PathBuf};

use crate::types::OutputFormat;

const STORE_FILE: &str = "storage.db";

/// Resolved paths and output settings shared by every handler.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    data_dir: PathBuf,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(data_dir: Option<&str>, format: OutputFormat) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir)?;
        Ok(Self { data_dir, format })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        Config::default_path(&self.data_dir)
    }

    pub fn json_mode(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// `config.toml` if present, defaults otherwise.
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        Config::load_from(&path).with_context(|| format!("failed to load {}", path.display()))
    }

    pub fn open_store(&self, config: &Config) -> Result<SqliteStore> {
        let path = self.store_path();
        SqliteStore::open(&path, config.storage.quota())
            .with_context(|| format!("failed to open store at {}", path.display()))
    }

    pub fn store_exists(&self) -> bool {
        self.store_path().exists()
    }
}
