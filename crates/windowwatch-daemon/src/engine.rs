use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use tokio::sync::broadcast;
use windowwatch_core::models::{Config, Countdown, DisplayConfig, Progress, Window, WindowState};
use windowwatch_core::{eastern, Clock};

use crate::action::ActionHandler;
use crate::display::{DisplaySink, StateView};
use crate::events::{WindowEvent, WindowEventType};
use crate::presenter::{CountdownUpdate, Presenter};
use crate::scheduler::{Scheduler, TaskId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Core error: {0}")]
    Core(#[from] windowwatch_core::Error),

    #[error("Action failed: {0}")]
    Action(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineTask {
    Clock,
    Countdown,
}

/// The two recurring ticks the engine needs.
pub struct EngineSchedule {
    scheduler: Scheduler,
    clock: TaskId,
    countdown: TaskId,
}

impl EngineSchedule {
    /// The clock task is registered first so it renders before the countdown
    /// on startup.
    pub fn new(display: &DisplayConfig) -> Self {
        let mut scheduler = Scheduler::new();
        let clock = scheduler.every("clock", display.clock_interval());
        let countdown = scheduler.every("countdown", display.countdown_interval());
        Self {
            scheduler,
            clock,
            countdown,
        }
    }

    /// Cancel safe.
    pub async fn next(&mut self) -> EngineTask {
        loop {
            let id = self.scheduler.next().await;
            if id == self.clock {
                return EngineTask::Clock;
            }
            if id == self.countdown {
                return EngineTask::Countdown;
            }
        }
    }
}

/// Everything a display would show at one instant.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    pub now: DateTime<Utc>,
    pub window: Window,
    pub state: WindowState,
    pub view: StateView,
    pub countdown: Countdown,
    pub progress: Option<Progress>,
    pub progress_label: Option<String>,
    pub description: String,
    pub local_time: String,
}

pub struct WindowEngine<C: Clock> {
    clock: C,
    window: Window,
    presenter: Presenter,
    event_tx: broadcast::Sender<WindowEvent>,
}

impl<C: Clock> WindowEngine<C> {
    pub fn new(
        clock: C,
        window: Window,
        closed_message: impl Into<String>,
        event_tx: broadcast::Sender<WindowEvent>,
    ) -> Self {
        Self {
            clock,
            window,
            presenter: Presenter::new(closed_message),
            event_tx,
        }
    }

    pub fn from_config(
        clock: C,
        config: &Config,
        event_tx: broadcast::Sender<WindowEvent>,
    ) -> Result<Self> {
        let window = config.window()?;
        Ok(Self::new(
            clock,
            window,
            config.window.closed_message.clone(),
            event_tx,
        ))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn current_state(&self) -> WindowState {
        self.presenter.current_state()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WindowEvent> {
        self.event_tx.subscribe()
    }

    pub fn run_task(&mut self, task: EngineTask, sink: &mut dyn DisplaySink) {
        match task {
            EngineTask::Clock => {
                self.clock_tick(sink);
            }
            EngineTask::Countdown => {
                self.countdown_tick(sink);
            }
        }
    }

    pub fn countdown_tick(&mut self, sink: &mut dyn DisplaySink) -> CountdownUpdate {
        let now = self.clock.now();
        let update = self.presenter.update_countdown(now, &self.window, sink);

        if update.transitioned() {
            tracing::info!(
                "Window state changed: {} -> {}",
                update.previous_state,
                update.state
            );
            let _ = self.event_tx.send(WindowEvent::state_changed(
                now,
                update.previous_state,
                update.state,
            ));
        }

        let _ = self.event_tx.send(WindowEvent::tick(
            now,
            update.state,
            update.countdown,
            update.progress,
        ));

        update
    }

    pub fn clock_tick(&mut self, sink: &mut dyn DisplaySink) -> String {
        let now = self.clock.now();
        let display = self.presenter.update_clock(now, sink);
        let _ = self.event_tx.send(WindowEvent::new(
            WindowEventType::ClockTick {
                display: display.clone(),
            },
            now,
        ));
        display
    }

    /// Forward the call-to-action if it is currently shown. Returns whether
    /// the handler ran.
    pub fn trigger_action(&mut self, handler: &mut dyn ActionHandler) -> Result<bool> {
        let state = self.presenter.current_state();
        if !StateView::for_state(state).show_action {
            tracing::debug!(%state, "Action ignored while hidden");
            return Ok(false);
        }

        handler
            .on_action(state)
            .map_err(|e| EngineError::Action(format!("{:#}", e)))?;

        let _ = self.event_tx.send(WindowEvent::new(
            WindowEventType::ActionTriggered { state },
            self.clock.now(),
        ));
        Ok(true)
    }

    /// Compute a snapshot without touching presenter state.
    pub fn snapshot(&self) -> Snapshot {
        let now = self.clock.now();
        let state = self.window.resolve(now);
        let progress = state
            .is_open()
            .then(|| Progress::compute(now, &self.window));

        Snapshot {
            now,
            window: self.window,
            state,
            view: StateView::for_state(state),
            countdown: Countdown::compute(state, now, &self.window),
            progress,
            progress_label: progress.map(|p| p.label()),
            description: self.presenter.description(state, &self.window),
            local_time: eastern::format(now),
        }
    }

    /// Drive both ticks until `shutdown` resolves.
    pub async fn run<F>(
        &mut self,
        schedule: &mut EngineSchedule,
        sink: &mut dyn DisplaySink,
        shutdown: F,
    ) where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                task = schedule.next() => self.run_task(task, sink),
                _ = &mut shutdown => {
                    tracing::info!("Engine stopping");
                    break;
                }
            }
        }
    }
}
