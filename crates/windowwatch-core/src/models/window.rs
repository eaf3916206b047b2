use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The fixed interval `[opens_at, closes_at]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    opens_at: DateTime<Utc>,
    closes_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowState {
    PreOpen,
    Open,
    Closed,
}

impl Window {
    pub fn new(opens_at: DateTime<Utc>, closes_at: DateTime<Utc>) -> Result<Self> {
        if opens_at >= closes_at {
            return Err(Error::Validation(format!(
                "Window must open before it closes (opens {}, closes {})",
                opens_at.to_rfc3339(),
                closes_at.to_rfc3339()
            )));
        }

        Ok(Self {
            opens_at,
            closes_at,
        })
    }

    pub fn opens_at(&self) -> DateTime<Utc> {
        self.opens_at
    }

    pub fn closes_at(&self) -> DateTime<Utc> {
        self.closes_at
    }

    /// Always positive.
    pub fn length(&self) -> Duration {
        self.closes_at - self.opens_at
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> WindowState {
        WindowState::resolve(now, self.opens_at, self.closes_at)
    }
}

impl WindowState {
    /// Both bounds belong to `Open`.
    pub fn resolve(
        now: DateTime<Utc>,
        opens_at: DateTime<Utc>,
        closes_at: DateTime<Utc>,
    ) -> Self {
        if now < opens_at {
            WindowState::PreOpen
        } else if now <= closes_at {
            WindowState::Open
        } else {
            WindowState::Closed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowState::PreOpen => "PRE_OPEN",
            WindowState::Open => "OPEN",
            WindowState::Closed => "CLOSED",
        }
    }

    /// Text shown on the state pill.
    pub fn label(&self) -> &'static str {
        match self {
            WindowState::PreOpen => "OPENS IN",
            WindowState::Open => "OPEN NOW",
            WindowState::Closed => "CLOSED",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, WindowState::Open)
    }
}

impl Default for WindowState {
    fn default() -> Self {
        WindowState::PreOpen
    }
}

impl std::fmt::Display for WindowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
