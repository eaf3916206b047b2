//! WindowWatch Daemon Library
//!
//! Presentation, scheduling and the tick engine, shared by the headless
//! daemon and the TUI.

pub mod action;
pub mod display;
pub mod engine;
pub mod events;
pub mod presenter;
pub mod scheduler;

pub use action::{ActionHandler, LoggingAction};
pub use display::{CountdownField, DisplaySink, DisplayState, Indicator, LogSink, StateView};
pub use engine::{EngineError, EngineSchedule, EngineTask, Snapshot, WindowEngine};
pub use events::{WindowEvent, WindowEventType};
pub use presenter::{CountdownUpdate, Presenter};
pub use scheduler::{Scheduler, TaskId};

use std::path::PathBuf;
use windowwatch_core::models::{Config, WindowConfig};
use windowwatch_core::storage::{get_config_dir, init_config_dir, ConfigStorage};
use windowwatch_core::Result;

/// Load the config file (or the default location, creating it with defaults
/// when missing) and apply command-line bound overrides on top of it.
pub fn load_config(
    path: Option<PathBuf>,
    opens_at: Option<&str>,
    closes_at: Option<&str>,
) -> Result<Config> {
    let storage = match path {
        Some(path) => ConfigStorage::at_path(path),
        None => ConfigStorage::new(init_config_dir()?),
    };

    let config = storage.load()?;
    tracing::debug!("Loaded config from {}", storage.path().display());

    apply_overrides(config, opens_at, closes_at)
}

/// Like [`load_config`] but never touches the filesystem beyond reading:
/// a missing or empty file yields the defaults.
pub fn read_config(
    path: Option<PathBuf>,
    opens_at: Option<&str>,
    closes_at: Option<&str>,
) -> Result<Config> {
    let storage = match path {
        Some(path) => ConfigStorage::at_path(path),
        None => ConfigStorage::new(get_config_dir()?),
    };

    let config = match storage.read()? {
        Some(config) => {
            tracing::debug!("Read config from {}", storage.path().display());
            config
        }
        None => {
            tracing::debug!("No config at {}, using defaults", storage.path().display());
            Config::default()
        }
    };

    apply_overrides(config, opens_at, closes_at)
}

/// Overrides go on before validation so a bad file can be corrected from the
/// command line.
fn apply_overrides(
    mut config: Config,
    opens_at: Option<&str>,
    closes_at: Option<&str>,
) -> Result<Config> {
    if let Some(value) = opens_at {
        config.window.opens_at = WindowConfig::parse_instant(value)?;
    }
    if let Some(value) = closes_at {
        config.window.closes_at = WindowConfig::parse_instant(value)?;
    }

    config.validate()?;
    Ok(config)
}
