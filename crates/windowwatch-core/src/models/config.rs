//! Application configuration

use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Window;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub window: WindowConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
    #[serde(default = "default_closed_message")]
    pub closed_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    pub countdown_interval_ms: u64,
    pub clock_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonConfig {
    pub log_level: String,
}

fn default_closed_message() -> String {
    "Migration window has closed".to_string()
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        self.display.validate()?;
        self.daemon.validate()?;
        Ok(())
    }

    pub fn window(&self) -> Result<Window> {
        self.window.build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            window: WindowConfig::default(),
            display: DisplayConfig::default(),
            daemon: DaemonConfig::default(),
        }
    }
}

impl WindowConfig {
    pub fn validate(&self) -> Result<()> {
        self.build()?;

        if self.closed_message.trim().is_empty() {
            return Err(Error::Validation(
                "Closed message cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn build(&self) -> Result<Window> {
        Window::new(self.opens_at, self.closes_at)
    }

    /// Parse an RFC 3339 timestamp as given on the command line.
    pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        // Sep 23 to Sep 30, 2025, noon Eastern.
        Self {
            opens_at: Utc
                .timestamp_opt(1_758_643_200, 0)
                .single()
                .unwrap_or_default(),
            closes_at: Utc
                .timestamp_opt(1_759_248_000, 0)
                .single()
                .unwrap_or_default(),
            closed_message: default_closed_message(),
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        const MIN_INTERVAL_MS: u64 = 100;
        const MAX_INTERVAL_MS: u64 = 60_000;

        for (name, value) in [
            ("Countdown interval", self.countdown_interval_ms),
            ("Clock interval", self.clock_interval_ms),
        ] {
            if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&value) {
                return Err(Error::Validation(format!(
                    "{} must be between {} and {} ms, got {}",
                    name, MIN_INTERVAL_MS, MAX_INTERVAL_MS, value
                )));
            }
        }

        Ok(())
    }

    pub fn countdown_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.countdown_interval_ms)
    }

    pub fn clock_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.clock_interval_ms)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            countdown_interval_ms: 1000,
            clock_interval_ms: 1000,
        }
    }
}

impl DaemonConfig {
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        Ok(())
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
