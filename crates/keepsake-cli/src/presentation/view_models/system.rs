use keepsake_tracker::Config;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClearViewModel {
    pub removed_keys: Vec<String>,
}

impl fmt::Display for ClearViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.removed_keys.is_empty() {
            return writeln!(f, "Nothing to remove.");
        }
        for key in &self.removed_keys {
            writeln!(f, "  removed {}", key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigViewModel {
    pub path: String,
    pub exists: bool,
    pub config: Config,
    #[serde(skip)]
    pub rendered: String,
}

impl fmt::Display for ConfigViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let origin = if self.exists { "" } else { " (not written, defaults)" };
        writeln!(f, "# {}{}", self.path, origin)?;
        write!(f, "{}", self.rendered)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusViewModel {
    pub data_dir: String,
    pub store_exists: bool,
    pub config_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_interactions: Option<usize>,
}

impl fmt::Display for StatusViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mark = |present: bool| if present { "present" } else { "missing" };

        writeln!(f, "Data directory: {}", self.data_dir)?;
        writeln!(f, "  storage.db:   {}", mark(self.store_exists))?;
        writeln!(f, "  config.toml:  {}", mark(self.config_exists))?;
        if let Some(count) = self.stored_interactions {
            writeln!(f, "  stored log:   {} interactions", count)?;
        }
        Ok(())
    }
}
