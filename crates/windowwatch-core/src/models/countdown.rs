use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Window, WindowState};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time split into truncated units. Days are not capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn compute(state: WindowState, now: DateTime<Utc>, window: &Window) -> Self {
        let remaining = match state {
            WindowState::PreOpen => (window.opens_at() - now).num_milliseconds(),
            WindowState::Open => (window.closes_at() - now).num_milliseconds(),
            WindowState::Closed => 0,
        };

        Self::from_millis(remaining)
    }

    /// Non-positive durations collapse to all zeros.
    pub fn from_millis(remaining: i64) -> Self {
        if remaining <= 0 {
            return Self::default();
        }

        Self {
            days: (remaining / MS_PER_DAY) as u64,
            hours: ((remaining % MS_PER_DAY) / MS_PER_HOUR) as u64,
            minutes: ((remaining % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
            seconds: ((remaining % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
        }
    }

    pub fn total_millis(&self) -> u64 {
        self.days * MS_PER_DAY as u64
            + self.hours * MS_PER_HOUR as u64
            + self.minutes * MS_PER_MINUTE as u64
            + self.seconds * MS_PER_SECOND as u64
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Days, hours, minutes, seconds padded to at least two digits.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}
