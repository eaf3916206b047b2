//! Window events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use windowwatch_core::models::{Countdown, Progress, WindowState};

/// Event emitted by the window engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowEvent {
    pub event_type: WindowEventType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowEventType {
    /// Countdown tick (periodic update)
    Tick {
        state: WindowState,
        countdown: Countdown,
        progress: Option<Progress>,
    },
    /// The window moved to a new state
    StateChanged { from: WindowState, to: WindowState },
    /// Local clock display refreshed
    ClockTick { display: String },
    /// The call-to-action was used
    ActionTriggered { state: WindowState },
}

impl WindowEvent {
    /// `timestamp` is the engine clock's reading, not the host's.
    pub fn new(event_type: WindowEventType, timestamp: DateTime<Utc>) -> Self {
        Self {
            event_type,
            timestamp,
        }
    }

    pub fn tick(
        timestamp: DateTime<Utc>,
        state: WindowState,
        countdown: Countdown,
        progress: Option<Progress>,
    ) -> Self {
        Self::new(
            WindowEventType::Tick {
                state,
                countdown,
                progress,
            },
            timestamp,
        )
    }

    pub fn state_changed(timestamp: DateTime<Utc>, from: WindowState, to: WindowState) -> Self {
        Self::new(WindowEventType::StateChanged { from, to }, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_state_changed_serialization() {
        let at = Utc.with_ymd_and_hms(2025, 9, 23, 16, 0, 0).unwrap();
        let event = WindowEvent::state_changed(at, WindowState::PreOpen, WindowState::Open);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"]["type"], "state_changed");
        assert_eq!(json["event_type"]["from"], "PRE_OPEN");
        assert_eq!(json["event_type"]["to"], "OPEN");

        let back: WindowEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_tick_event_creation() {
        let at = Utc.with_ymd_and_hms(2025, 9, 23, 15, 0, 0).unwrap();
        let event = WindowEvent::tick(at, WindowState::PreOpen, Countdown::from_millis(3_600_000), None);

        match event.event_type {
            WindowEventType::Tick {
                state, countdown, ..
            } => {
                assert_eq!(state, WindowState::PreOpen);
                assert_eq!(countdown.hours, 1);
            }
            _ => panic!("Wrong event type"),
        }
    }
}
