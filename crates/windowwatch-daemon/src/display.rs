//! Display regions the presenter writes into.

use serde::Serialize;
use std::time::{Duration, Instant};
use windowwatch_core::models::WindowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownField {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl CountdownField {
    pub const ALL: [Self; 4] = [Self::Days, Self::Hours, Self::Minutes, Self::Seconds];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            CountdownField::Days => "DAYS",
            CountdownField::Hours => "HOURS",
            CountdownField::Minutes => "MINUTES",
            CountdownField::Seconds => "SECONDS",
        }
    }
}

/// Visual marker on the state pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Neutral,
    Open,
    Closed,
}

/// Everything that changes only when the window state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub label: &'static str,
    pub indicator: Indicator,
    pub show_progress: bool,
    pub show_action: bool,
}

impl StateView {
    pub fn for_state(state: WindowState) -> Self {
        match state {
            WindowState::PreOpen => Self {
                label: state.label(),
                indicator: Indicator::Neutral,
                show_progress: false,
                show_action: false,
            },
            WindowState::Open => Self {
                label: state.label(),
                indicator: Indicator::Open,
                show_progress: true,
                show_action: true,
            },
            WindowState::Closed => Self {
                label: state.label(),
                indicator: Indicator::Closed,
                show_progress: false,
                show_action: false,
            },
        }
    }
}

impl Default for StateView {
    fn default() -> Self {
        Self::for_state(WindowState::default())
    }
}

pub trait DisplaySink {
    fn set_field(&mut self, field: CountdownField, value: &str);
    fn set_state_view(&mut self, view: &StateView);
    fn set_description(&mut self, text: &str);
    fn set_progress(&mut self, percent: f64, label: &str);
    fn set_local_time(&mut self, text: &str);
}

/// In-memory copy of every display region.
#[derive(Debug, Clone)]
pub struct DisplayState {
    fields: [String; 4],
    changed_at: [Option<Instant>; 4],
    pub state_view: StateView,
    pub description: String,
    pub progress_percent: f64,
    pub progress_label: String,
    pub local_time: String,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            fields: std::array::from_fn(|_| "00".to_string()),
            changed_at: [None; 4],
            state_view: StateView::default(),
            description: String::new(),
            progress_percent: 0.0,
            progress_label: String::new(),
            local_time: String::new(),
        }
    }

    pub fn field(&self, field: CountdownField) -> &str {
        &self.fields[field.index()]
    }

    /// True while a field is still inside its change highlight.
    pub fn recently_changed(&self, field: CountdownField, within: Duration) -> bool {
        self.changed_at[field.index()].is_some_and(|at| at.elapsed() < within)
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for DisplayState {
    fn set_field(&mut self, field: CountdownField, value: &str) {
        self.fields[field.index()] = value.to_string();
        self.changed_at[field.index()] = Some(Instant::now());
    }

    fn set_state_view(&mut self, view: &StateView) {
        self.state_view = view.clone();
    }

    fn set_description(&mut self, text: &str) {
        if self.description != text {
            self.description = text.to_string();
        }
    }

    fn set_progress(&mut self, percent: f64, label: &str) {
        self.progress_percent = percent;
        if self.progress_label != label {
            self.progress_label = label.to_string();
        }
    }

    fn set_local_time(&mut self, text: &str) {
        self.local_time = text.to_string();
    }
}

/// Headless sink: keeps a [`DisplayState`] and logs what changes.
#[derive(Debug, Default)]
pub struct LogSink {
    pub display: DisplayState,
}

impl DisplaySink for LogSink {
    fn set_field(&mut self, field: CountdownField, value: &str) {
        tracing::trace!(field = field.label(), value, "countdown field");
        self.display.set_field(field, value);
    }

    fn set_state_view(&mut self, view: &StateView) {
        tracing::info!(
            label = view.label,
            progress = view.show_progress,
            action = view.show_action,
            "State display updated"
        );
        self.display.set_state_view(view);
    }

    fn set_description(&mut self, text: &str) {
        if self.display.description != text {
            tracing::info!("{}", text);
        }
        self.display.set_description(text);
    }

    fn set_progress(&mut self, percent: f64, label: &str) {
        if self.display.progress_label != label {
            tracing::info!(percent, "{}", label);
        }
        self.display.set_progress(percent, label);
    }

    fn set_local_time(&mut self, text: &str) {
        tracing::debug!("Local time: {}", text);
        self.display.set_local_time(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_views() {
        let pre = StateView::for_state(WindowState::PreOpen);
        assert_eq!(pre.label, "OPENS IN");
        assert!(!pre.show_progress && !pre.show_action);

        let open = StateView::for_state(WindowState::Open);
        assert_eq!(open.indicator, Indicator::Open);
        assert!(open.show_progress && open.show_action);

        let closed = StateView::for_state(WindowState::Closed);
        assert_eq!(closed.label, "CLOSED");
        assert_eq!(closed.indicator, Indicator::Closed);
        assert!(!closed.show_progress && !closed.show_action);
    }

    #[test]
    fn test_display_state_defaults() {
        let display = DisplayState::new();
        for field in CountdownField::ALL {
            assert_eq!(display.field(field), "00");
            assert!(!display.recently_changed(field, Duration::from_secs(60)));
        }
        assert_eq!(display.state_view, StateView::for_state(WindowState::PreOpen));
    }

    #[test]
    fn test_field_change_marks_highlight() {
        let mut display = DisplayState::new();
        display.set_field(CountdownField::Seconds, "42");
        assert_eq!(display.field(CountdownField::Seconds), "42");
        assert!(display.recently_changed(CountdownField::Seconds, Duration::from_secs(60)));
        assert!(!display.recently_changed(CountdownField::Days, Duration::from_secs(60)));
    }
}
