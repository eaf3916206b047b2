//! Application state management

use crossterm::event::KeyCode;
use windowwatch_core::models::WindowState;
use windowwatch_core::{Clock, SystemClock};
use windowwatch_daemon::{DisplayState, EngineTask, LoggingAction, WindowEngine};

pub struct App<C: Clock = SystemClock> {
    pub engine: WindowEngine<C>,
    pub display: DisplayState,
    pub action: LoggingAction,
    pub status_message: String,
    pub should_quit: bool,
}

impl<C: Clock> App<C> {
    pub fn new(engine: WindowEngine<C>) -> Self {
        Self {
            engine,
            display: DisplayState::new(),
            action: LoggingAction::new(),
            status_message: String::new(),
            should_quit: false,
        }
    }

    pub fn run_task(&mut self, task: EngineTask) {
        self.engine.run_task(task, &mut self.display);
    }

    pub fn trigger_action(&mut self) {
        match self.engine.trigger_action(&mut self.action) {
            Ok(true) => {
                self.status_message = "✓ Migration started".to_string();
            }
            Ok(false) => {
                self.status_message = match self.engine.current_state() {
                    WindowState::Closed => "The window has closed".to_string(),
                    _ => "Available once the window opens".to_string(),
                };
            }
            Err(e) => {
                tracing::error!("Action failed: {}", e);
                self.status_message = format!("✗ {}", e);
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('a') => self.trigger_action(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tokio::sync::broadcast;
    use windowwatch_core::models::Config;
    use windowwatch_core::ManualClock;

    fn app_at(y: i32, mo: u32, d: u32, h: u32) -> App<Arc<ManualClock>> {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap(),
        ));
        let (tx, _) = broadcast::channel(16);
        let engine = WindowEngine::from_config(clock, &Config::default(), tx).unwrap();
        let mut app = App::new(engine);
        app.run_task(EngineTask::Clock);
        app.run_task(EngineTask::Countdown);
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_at(2025, 9, 1, 0);
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_action_key_respects_state() {
        let mut app = app_at(2025, 9, 1, 0);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.action.triggered(), 0);
        assert_eq!(app.status_message, "Available once the window opens");

        let mut app = app_at(2025, 9, 25, 16);
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.action.triggered(), 1);
    }

    #[test]
    fn test_action_key_after_close() {
        let mut app = app_at(2025, 10, 1, 0);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.action.triggered(), 0);
        assert_eq!(app.status_message, "The window has closed");
    }
}
