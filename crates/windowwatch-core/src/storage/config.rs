//! Configuration storage operations

use crate::{models::Config, Result};
use std::path::{Path, PathBuf};

pub struct ConfigStorage {
    config_path: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_path: config_dir.join("config.json"),
        }
    }

    /// Use an explicit file instead of `<dir>/config.json`.
    pub fn at_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the file, writing the defaults first when it is missing or empty.
    ///
    /// The result is not validated; callers validate once any overrides are
    /// applied.
    pub fn load(&self) -> Result<Config> {
        match self.read()? {
            Some(config) => Ok(config),
            None => {
                let config = Config::default();
                self.save(&config)?;
                Ok(config)
            }
        }
    }

    /// Read the file without creating it. `None` when missing or empty.
    pub fn read(&self) -> Result<Option<Config>> {
        if !self.config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        Ok(())
    }
}
