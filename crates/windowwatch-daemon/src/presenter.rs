//! Pushes computed window values into display regions.

use chrono::{DateTime, Utc};
use windowwatch_core::eastern;
use windowwatch_core::models::{Countdown, Progress, Window, WindowState};

use crate::display::{CountdownField, DisplaySink, StateView};

/// What a single countdown tick computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownUpdate {
    pub state: WindowState,
    pub previous_state: WindowState,
    pub countdown: Countdown,
    pub progress: Option<Progress>,
    pub fields_written: usize,
}

impl CountdownUpdate {
    pub fn transitioned(&self) -> bool {
        self.state != self.previous_state
    }
}

pub struct Presenter {
    current_state: WindowState,
    previous: [Option<String>; 4],
    closed_message: String,
}

impl Presenter {
    pub fn new(closed_message: impl Into<String>) -> Self {
        Self {
            current_state: WindowState::PreOpen,
            previous: Default::default(),
            closed_message: closed_message.into(),
        }
    }

    pub fn current_state(&self) -> WindowState {
        self.current_state
    }

    pub fn description(&self, state: WindowState, window: &Window) -> String {
        match state {
            WindowState::PreOpen => format!("Opens {}", eastern::format_bound(window.opens_at())),
            WindowState::Open => format!("Closes {}", eastern::format_bound(window.closes_at())),
            WindowState::Closed => self.closed_message.clone(),
        }
    }

    pub fn update_countdown(
        &mut self,
        now: DateTime<Utc>,
        window: &Window,
        sink: &mut dyn DisplaySink,
    ) -> CountdownUpdate {
        let state = window.resolve(now);
        let previous_state = self.current_state;

        if state != previous_state {
            self.current_state = state;
            sink.set_state_view(&StateView::for_state(state));
        }

        sink.set_description(&self.description(state, window));

        let progress = if state.is_open() {
            let progress = Progress::compute(now, window);
            sink.set_progress(progress.percent(), &progress.label());
            Some(progress)
        } else {
            None
        };

        let countdown = Countdown::compute(state, now, window);
        let mut fields_written = 0;
        for (field, value) in CountdownField::ALL.into_iter().zip(countdown.padded()) {
            if self.write_field(field, value, sink) {
                fields_written += 1;
            }
        }

        CountdownUpdate {
            state,
            previous_state,
            countdown,
            progress,
            fields_written,
        }
    }

    pub fn update_clock(&self, now: DateTime<Utc>, sink: &mut dyn DisplaySink) -> String {
        let text = eastern::format(now);
        sink.set_local_time(&text);
        text
    }

    fn write_field(
        &mut self,
        field: CountdownField,
        value: String,
        sink: &mut dyn DisplaySink,
    ) -> bool {
        let slot = &mut self.previous[field.index()];
        if slot.as_deref() == Some(value.as_str()) {
            return false;
        }

        sink.set_field(field, &value);
        *slot = Some(value);
        true
    }
}
