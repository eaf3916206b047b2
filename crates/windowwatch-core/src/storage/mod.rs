pub mod config;

pub use config::ConfigStorage;

use crate::{Error, Result};
use std::path::PathBuf;

pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("windowwatch"))
        .ok_or_else(|| Error::InvalidData("Could not find config directory".to_string()))
}

pub fn init_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;
    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}
